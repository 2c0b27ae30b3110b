// ── Query cache infrastructure ──

mod cache;
mod key;

pub use cache::{CacheEntry, QueryCache};
pub use key::{Collection, FilterSet, QueryKey, Relation, Scope, Selector};
