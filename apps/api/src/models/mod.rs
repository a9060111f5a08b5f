pub mod content;
pub mod keyword;
pub mod serp;

pub use content::ContentRecord;
pub use keyword::{KeywordRecord, RankedKeyword};
pub use serp::SearchResult;
