//! The set of key names that are redacted by default.
//!
//! The set is handed to the local variable filter so a custom filter can make
//! the same decision the default redaction would have made.

use alloc::string::String;
use core::fmt;

use hashbrown::HashSet;

/// Key names redacted when nothing else has been configured.
pub const DEFAULT_FILTER_KEYS: &[&str] = &["password", "HTTP_AUTHORIZATION"];

/// A case-insensitive set of key names.
///
/// Keys are stored lowercased, so `contains("Password")` matches a stored
/// `"password"`.
///
/// # Examples
///
/// ```rust
/// use notice_callbacks::filter_keys::FilterKeys;
///
/// let mut keys = FilterKeys::with_defaults();
/// keys.insert("api_token");
///
/// assert!(keys.contains("PASSWORD"));
/// assert!(keys.contains("api_token"));
/// assert!(!keys.contains("username"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FilterKeys {
    keys: HashSet<String, rustc_hash::FxBuildHasher>,
}

impl FilterKeys {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing [`DEFAULT_FILTER_KEYS`].
    pub fn with_defaults() -> Self {
        let mut keys = Self::new();
        keys.extend(DEFAULT_FILTER_KEYS.iter().copied());
        keys
    }

    /// Adds a key. Returns `false` if an equal key was already present.
    pub fn insert(&mut self, key: impl AsRef<str>) -> bool {
        self.keys.insert(key.as_ref().to_lowercase())
    }

    /// Whether `key` is in the set, ignoring ASCII and Unicode case.
    pub fn contains(&self, key: &str) -> bool {
        // Titlecase letters are not uppercase but still change when lowercased.
        if key.chars().all(|c| c.to_lowercase().eq(core::iter::once(c))) {
            self.keys.contains(key)
        } else {
            self.keys.contains(key.to_lowercase().as_str())
        }
    }

    /// Iterates over the stored (lowercased) keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: AsRef<str>> Extend<S> for FilterKeys {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for FilterKeys {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut keys = Self::new();
        keys.extend(iter);
        keys
    }
}

impl fmt::Debug for FilterKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
