pub mod aggregator;
pub mod rss;
pub mod types;

pub use aggregator::NewsAggregator;
pub use types::{News, NewsItem, NewsMode};
