pub mod date;
pub mod link;
pub mod meta;
pub mod name;

use chrono::{DateTime, Utc};
use scraper::ElementRef;

use super::record::ResultRecord;

/// Build the record for one result block. Each field is looked up on its
/// own; a missing sub-element only blanks that field.
pub fn extract_record(block: &ElementRef, rank: usize, now: DateTime<Utc>) -> ResultRecord {
    let name = name::extract(block);
    let link = link::extract(block);
    let meta = meta::extract(block);
    let updated_at = meta
        .raw_updated_at
        .as_deref()
        .and_then(|raw| date::parse_updated_at(raw, now));

    ResultRecord {
        name,
        link,
        description: meta.description,
        updated_at,
        rank,
        breadcrumb: meta.breadcrumb,
    }
}

// ── Tests ──
