pub mod error;
pub mod parser;

pub use error::{ParseError, Result};
pub use parser::extract::link::normalize_link;
pub use parser::record::{ResultRecord, SearchResultPage};
pub use parser::{parse_page, parse_page_at, parse_page_bytes, parse_page_bytes_at};
