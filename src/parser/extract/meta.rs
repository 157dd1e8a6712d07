use scraper::ElementRef;

use crate::parser::selectors::{
    BREADCRUMB_SEPARATORS, METADATA_SPAN_SEL, SNIPPET_SEL, TIMESTAMP_CLASS,
};

/// Metadata pulled from the spans of one result block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub breadcrumb: Option<String>,
    pub description: Option<String>,
    /// Timestamp text as shown on the page, e.g. "3 days ago".
    pub raw_updated_at: Option<String>,
}

pub fn extract(block: &ElementRef) -> Meta {
    let breadcrumb = non_empty(
        block
            .select(&METADATA_SPAN_SEL)
            .map(|span| span.text().collect::<String>())
            .filter(|text| BREADCRUMB_SEPARATORS.iter().any(|sep| text.contains(sep)))
            .collect::<String>(),
    );

    let Some(snippet) = block.select(&SNIPPET_SEL).next() else {
        return Meta {
            breadcrumb,
            ..Meta::default()
        };
    };

    let mut description = String::new();
    let mut timestamp = String::new();
    for span in snippet.select(&METADATA_SPAN_SEL) {
        let target = if is_timestamp(&span) {
            &mut timestamp
        } else {
            &mut description
        };
        target.extend(span.text());
    }

    let description = description.replace(['\u{a0}', '\n'], " ");

    Meta {
        breadcrumb,
        description: non_empty(description),
        raw_updated_at: non_empty(timestamp),
    }
}

fn is_timestamp(span: &ElementRef) -> bool {
    span.value().classes().any(|c| c == TIMESTAMP_CLASS)
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
