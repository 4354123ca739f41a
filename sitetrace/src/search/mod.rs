//! Search engine query construction and result collection.

mod collector;
mod query;

pub use collector::SerpCollector;
pub use query::build_search_url;
