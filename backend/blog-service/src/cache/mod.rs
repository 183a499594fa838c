/// Content caching layer
///
/// Only the index listing is cached: rendered page bytes kept for a fixed TTL
/// with no invalidation on writes.
pub mod page_cache;

pub use page_cache::PageCache;
