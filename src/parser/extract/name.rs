use scraper::ElementRef;

use crate::parser::selectors::NAME_SEL;

pub fn extract(block: &ElementRef) -> Option<String> {
    let span = block.select(&NAME_SEL).next()?;
    let text = span.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
