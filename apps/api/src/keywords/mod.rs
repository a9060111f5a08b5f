pub mod aggregator;
pub mod render;

pub use aggregator::aggregate_keywords;
pub use render::{render_competitors, render_keyword_list};
