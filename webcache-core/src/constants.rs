//! Constants shared across webcache crates.
//!
//! Key prefixes must stay byte-for-byte stable: existing deployments already
//! hold entries under these names.

// ═══════════════════════════════════════════════════════════════════════════════
// KEY NAMING
// ═══════════════════════════════════════════════════════════════════════════════

/// Prefix of the per-URL access counter key (`count:<url>`).
pub const COUNT_KEY_PREFIX: &str = "count";

/// Prefix of the per-URL cached page key (`cached:<url>`).
pub const CACHED_KEY_PREFIX: &str = "cached";

/// Separator between a key prefix and the raw URL.
pub const KEY_SEPARATOR: char = ':';

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE POLICY
// ═══════════════════════════════════════════════════════════════════════════════

/// Lifetime of a cached page, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP FETCH
// ═══════════════════════════════════════════════════════════════════════════════

/// Default request timeout for page fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 30;

/// User agent sent with page fetches.
pub const DEFAULT_USER_AGENT: &str = concat!("webcache/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// Redis connection URL used when nothing else is configured (local host, default port).
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefixes_distinct() {
        assert_ne!(COUNT_KEY_PREFIX, CACHED_KEY_PREFIX);
    }

    #[test]
    fn test_default_ttl_is_ten_seconds() {
        assert_eq!(DEFAULT_CACHE_TTL_SECONDS, 10);
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("webcache/"));
        assert!(DEFAULT_USER_AGENT.len() > "webcache/".len());
    }
}
