pub mod extract;
pub mod record;
pub mod selectors;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use tracing::{debug, info};

use crate::error::{ParseError, Result};
use record::SearchResultPage;
use selectors::{RELATED_SEARCH_SEL, RESULT_BLOCK_SEL};

/// Parse a results page, resolving relative timestamps against the current time.
pub fn parse_page(markup: &str) -> Result<SearchResultPage> {
    parse_page_at(markup, Utc::now())
}

/// Parse raw page bytes. Input that is not UTF-8 cannot be turned into a tree.
pub fn parse_page_bytes(bytes: &[u8]) -> Result<SearchResultPage> {
    parse_page_bytes_at(bytes, Utc::now())
}

pub fn parse_page_bytes_at(bytes: &[u8], now: DateTime<Utc>) -> Result<SearchResultPage> {
    let markup = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::MalformedMarkup(format!("input is not UTF-8: {e}")))?;
    parse_page_at(markup, now)
}

/// Single pass: markup → tree → result blocks → records.
/// `now` anchors timestamps such as "3 days ago".
pub fn parse_page_at(markup: &str, now: DateTime<Utc>) -> Result<SearchResultPage> {
    let document = Html::parse_document(markup);
    if document.tree.root().first_child().is_none() {
        return Err(ParseError::MalformedMarkup("document tree is empty".into()));
    }
    if !document.errors.is_empty() {
        debug!("Recovered from {} markup errors", document.errors.len());
    }

    let related_searches = document
        .select(&RELATED_SEARCH_SEL)
        .map(text_of)
        .collect();

    let results: Vec<_> = document
        .select(&RESULT_BLOCK_SEL)
        .enumerate()
        .map(|(rank, block)| extract::extract_record(&block, rank, now))
        .collect();

    info!("Extracted {} results", results.len());

    Ok(SearchResultPage {
        related_searches,
        results,
    })
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn parse(fixture: &str) -> SearchResultPage {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        parse_page_at(&html, now()).unwrap()
    }

    #[test]
    fn rust_results_ranks_in_document_order() {
        let page = parse("rust_lang");
        assert_eq!(page.results.len(), 5);
        for (i, r) in page.results.iter().enumerate() {
            assert_eq!(r.rank, i);
        }
        let names: Vec<_> = page.results.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(
            names,
            vec![
                Some("Rust Programming Language"),
                Some("The Rust Programming Language - The Rust Book"),
                Some("Rust (programming language) - Wikipedia"),
                Some("rust-lang/rust: Empowering everyone to build reliable ..."),
                None,
            ]
        );
    }

    #[test]
    fn rust_results_links() {
        let page = parse("rust_lang");
        let links: Vec<_> = page.results.iter().map(|r| r.link.as_deref()).collect();
        assert_eq!(
            links,
            vec![
                Some("https://www.rust-lang.org/"),
                Some("https://doc.rust-lang.org/book/"),
                Some("https://en.wikipedia.org/wiki/Rust_(programming_language)"),
                Some("https://github.com/rust-lang/rust"),
                None,
            ]
        );
    }

    #[test]
    fn rust_results_meta() {
        let page = parse("rust_lang");
        let first = &page.results[0];
        assert_eq!(first.breadcrumb.as_deref(), Some("www.rust-lang.org › learn"));
        assert_eq!(
            first.description.as_deref(),
            Some("A language empowering everyone to build reliable and efficient software.")
        );
        assert_eq!(first.updated_at, None);

        let book = &page.results[1];
        assert_eq!(book.breadcrumb.as_deref(), Some("doc.rust-lang.org › book"));
        assert_eq!(
            book.updated_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 29, 0, 0, 0).unwrap())
        );

        let wiki = &page.results[2];
        assert_eq!(
            wiki.updated_at,
            Some(Utc.with_ymd_and_hms(2024, 4, 12, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn missing_snippet_keeps_name_and_link() {
        let page = parse("rust_lang");
        let gh = &page.results[3];
        assert!(gh.name.is_some());
        assert!(gh.link.is_some());
        assert_eq!(gh.description, None);
        assert_eq!(gh.updated_at, None);
    }

    #[test]
    fn internal_link_block() {
        // Block pointing back at the search engine keeps its description.
        let page = parse("rust_lang");
        let last = &page.results[4];
        assert_eq!(last.link, None);
        assert_eq!(last.name, None);
        assert!(last.description.is_some());
    }

    #[test]
    fn related_searches_in_order() {
        let page = parse("rust_lang");
        assert_eq!(
            page.related_searches,
            vec!["rust game", "rust download", "rust vs c++"]
        );
    }

    #[test]
    fn related_search_without_text_keeps_its_slot() {
        let html = r#"<div>
            <a class="ZWRArf" href="/search?q=x">x</a>
            <a class="ZWRArf" href="/search?q=img"><img src="t.png"></a>
            <a class="ZWRArf" href="/search?q=y"> y </a>
          </div>"#;
        let page = parse_page_at(html, now()).unwrap();
        assert_eq!(page.related_searches, vec!["x", "", "y"]);
    }

    #[test]
    fn no_results_page() {
        let page = parse("no_results");
        assert!(page.results.is_empty());
        assert!(page.related_searches.is_empty());
    }

    #[test]
    fn repeated_parses_are_equal() {
        let html = std::fs::read_to_string("tests/fixtures/rust_lang.html").unwrap();
        let a = parse_page_at(&html, now()).unwrap();
        let b = parse_page_at(&html, now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn broken_markup_degrades() {
        let html = r#"<div class="ezO2md"><a href="https://example.com/"><span class="qXLe6d">Unclosed
            <div class="ezO2md"><span class="fYyStc">example.org › x"#;
        let page = parse_page_at(html, now()).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].link.as_deref(), Some("https://example.com/"));
        assert_eq!(page.results[1].rank, 1);
    }

    #[test]
    fn empty_input_is_an_empty_page() {
        let page = parse_page_at("", now()).unwrap();
        assert_eq!(page, SearchResultPage::default());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = parse_page_bytes(&[0x3c, 0x64, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::MalformedMarkup(_)));
    }

    #[test]
    fn bytes_entry_point() {
        let html = std::fs::read("tests/fixtures/rust_lang.html").unwrap();
        let page = parse_page_bytes(&html).unwrap();
        assert_eq!(page.results.len(), 5);
    }
}
