//! Store key derivation.
//!
//! The URL is embedded verbatim: no trimming, case folding, or percent
//! encoding. Two URLs that differ in any byte get different keys.

use crate::constants::{CACHED_KEY_PREFIX, COUNT_KEY_PREFIX, KEY_SEPARATOR};

/// Returns the access counter key for `url` (`count:<url>`).
pub fn count_key(url: &str) -> String {
    prefixed(COUNT_KEY_PREFIX, url)
}

/// Returns the cached page key for `url` (`cached:<url>`).
pub fn cached_key(url: &str) -> String {
    prefixed(CACHED_KEY_PREFIX, url)
}

fn prefixed(prefix: &str, url: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + 1 + url.len());
    key.push_str(prefix);
    key.push(KEY_SEPARATOR);
    key.push_str(url);
    key
}
