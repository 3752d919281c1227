// Response cache module
// Author: kelexine (https://github.com/kelexine)

pub mod key;
pub mod store;

pub use key::{compute_key, translation_key};
pub use store::{CacheEntry, CacheStore};
