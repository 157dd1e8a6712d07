//! Structural markers of the basic (no-JS) results layout.
//!
//! Every class name the parser relies on lives here. When the results page
//! changes shape, this is the file to update.

use std::sync::LazyLock;

use scraper::Selector;

/// One search hit.
pub const RESULT_BLOCK: &str = "div.ezO2md";
/// Suggested alternate query.
pub const RELATED_SEARCH: &str = "a.ZWRArf";
/// Result title inside a block.
pub const NAME: &str = "span.qXLe6d";
pub const ANCHOR: &str = "a";
/// Metadata spans carry the breadcrumb, the snippet text and the timestamp.
pub const METADATA_SPAN: &str = "span.fYyStc";
/// Snippet container holding description and timestamp spans.
pub const SNIPPET: &str = "div.YgS6de";

/// Class that marks a metadata span as the timestamp.
pub const TIMESTAMP_CLASS: &str = "YVIcad";

/// Separators that identify the breadcrumb span. The second entry is the
/// UTF-8 `›` read back as Windows-1252, which shows up on mis-decoded pages.
pub const BREADCRUMB_SEPARATORS: &[&str] = &[" \u{203a} ", " \u{e2}\u{20ac}\u{ba} "];

fn compile(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

pub static RESULT_BLOCK_SEL: LazyLock<Selector> = LazyLock::new(|| compile(RESULT_BLOCK));
pub static RELATED_SEARCH_SEL: LazyLock<Selector> = LazyLock::new(|| compile(RELATED_SEARCH));
pub static NAME_SEL: LazyLock<Selector> = LazyLock::new(|| compile(NAME));
pub static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| compile(ANCHOR));
pub static METADATA_SPAN_SEL: LazyLock<Selector> = LazyLock::new(|| compile(METADATA_SPAN));
pub static SNIPPET_SEL: LazyLock<Selector> = LazyLock::new(|| compile(SNIPPET));
