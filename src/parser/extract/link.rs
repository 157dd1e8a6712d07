use scraper::ElementRef;
use url::Url;

use crate::parser::selectors::ANCHOR_SEL;

const INTERNAL_HOST_MARKER: &str = "google";
const REDIRECT_PREFIX: &str = "/url?";

/// First anchor of the block, decoded to its external destination.
pub fn extract(block: &ElementRef) -> Option<String> {
    let href = block.select(&ANCHOR_SEL).next()?.value().attr("href")?;
    normalize_link(href)
}

/// Recover the outbound destination from a result-page href.
///
/// Links come in three shapes: a direct absolute URL, an absolute redirect
/// endpoint (`https://www.google.com/url?url=...`) and a relative tracked
/// redirect (`/url?q=...&sa=U`). A link that resolves to a host containing
/// `google` is navigation and yields `None`.
pub fn normalize_link(raw: &str) -> Option<String> {
    let raw = raw.trim();

    if let Some(parsed) = parse_with_default_scheme(raw) {
        // Direct link.
        if is_external(&parsed) {
            return Some(raw.to_string());
        }
        // Absolute redirect endpoint.
        if parsed.host_str().is_some_and(|h| !h.is_empty()) && parsed.path().starts_with("/url") {
            let target = parsed
                .query_pairs()
                .find(|(k, v)| k == "url" && !v.is_empty())
                .map(|(_, v)| v.into_owned());
            if let Some(link) = target.and_then(|t| external_link(&t)) {
                return Some(link);
            }
        }
    }

    // Relative tracked redirect: `q` first, `url` when `q` is missing.
    let query = raw.strip_prefix(REDIRECT_PREFIX)?;
    let target = query_param(query, "q").or_else(|| query_param(query, "url"))?;
    external_link(&target)
}

/// `http` is assumed only for parsing; callers get the href back as written.
fn parse_with_default_scheme(s: &str) -> Option<Url> {
    Url::parse(&with_default_scheme(s)).ok()
}

fn with_default_scheme(s: &str) -> String {
    if s.starts_with("//") {
        format!("http:{s}")
    } else {
        s.to_string()
    }
}

fn is_external(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| !h.is_empty() && !h.contains(INTERNAL_HOST_MARKER))
}

fn external_link(candidate: &str) -> Option<String> {
    let parsed = parse_with_default_scheme(candidate)?;
    is_external(&parsed).then(|| candidate.to_string())
}

/// Empty values count as missing, so `q=&url=...` falls through to `url`.
fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}
