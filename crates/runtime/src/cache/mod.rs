//! Ranking cache layer.
//!
//! The cache is strictly derived and disposable: losing it (or every entry in
//! it) only costs a recomputation from the store.

mod error;
mod memory;
mod traits;

pub use error::{CacheError, Result};
pub use memory::InMemoryRankingCache;
pub use traits::RankingCache;
