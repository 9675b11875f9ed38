//! The configuration object that owns a [`Callbacks`] registry.
//!
//! [`Config`] adds what the pipeline needs around the callbacks: the default
//! [`FilterKeys`] and an optional project root. When a slot is empty, its
//! helper falls back to the default behavior instead of passing data through
//! untouched.

use alloc::{borrow::Cow, string::String};

use crate::{
    builtin_filters::{self, PROJECT_ROOT_PLACEHOLDER},
    callbacks::Callbacks,
    filter_keys::FilterKeys,
    notice::{Exception, Fingerprint, LocalValue, Notice},
};

/// Client configuration owning the callback registry.
///
/// # Examples
///
/// ```rust
/// use notice_callbacks::Config;
///
/// let mut config = Config::new().with_project_root("/srv/app");
/// config.filter_keys_mut().insert("api_token");
///
/// assert_eq!(
///     config.filter_backtrace_line("/srv/app/src/main.rs:3"),
///     "[PROJECT_ROOT]/src/main.rs:3"
/// );
///
/// let value = config.filter_local_variable("API_TOKEN", Box::new(1234u32));
/// assert_eq!(*value.downcast_ref::<&str>().unwrap(), "[FILTERED]");
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    callbacks: Callbacks,
    filter_keys: FilterKeys,
    project_root: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration with empty callbacks, the default filter keys
    /// and no project root.
    pub fn new() -> Self {
        Self {
            callbacks: Callbacks::new(),
            filter_keys: FilterKeys::with_defaults(),
            project_root: None,
        }
    }

    /// Sets the project root that is replaced in backtrace lines when no
    /// backtrace filter is configured.
    #[must_use]
    pub fn with_project_root(mut self, root: impl Into<String>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Replaces the callbacks.
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Replaces the filter keys.
    #[must_use]
    pub fn with_filter_keys(mut self, filter_keys: FilterKeys) -> Self {
        self.filter_keys = filter_keys;
        self
    }

    /// The callback registry.
    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Mutable access to the callback registry, for registering callbacks.
    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// The filter keys.
    pub fn filter_keys(&self) -> &FilterKeys {
        &self.filter_keys
    }

    /// Mutable access to the filter keys.
    pub fn filter_keys_mut(&mut self) -> &mut FilterKeys {
        &mut self.filter_keys
    }

    /// The configured project root.
    pub fn project_root(&self) -> Option<&str> {
        self.project_root.as_deref()
    }

    /// Consumes the configuration, returning its callbacks.
    pub fn into_callbacks(self) -> Callbacks {
        self.callbacks
    }

    /// Formats a backtrace line.
    ///
    /// Uses the backtrace filter if one is set. Otherwise the project root,
    /// if configured, is replaced with [`PROJECT_ROOT_PLACEHOLDER`].
    pub fn filter_backtrace_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.callbacks.backtrace_filter().is_some() {
            return self.callbacks.filter_backtrace_line(line);
        }
        match &self.project_root {
            Some(root) => builtin_filters::substitute_prefix(line, root, PROJECT_ROOT_PLACEHOLDER),
            None => Cow::Borrowed(line),
        }
    }

    /// Runs the exception filter. `None` means the report is suppressed.
    pub fn filter_exception(&self, exception: Exception) -> Option<Exception> {
        self.callbacks.filter_exception(exception)
    }

    /// Computes the custom fingerprint for `notice`, if a generator is set.
    pub fn fingerprint(&self, notice: &Notice) -> Option<Fingerprint> {
        self.callbacks.fingerprint(notice)
    }

    /// Redacts a captured local variable.
    ///
    /// Uses the local variable filter if one is set, handing it this
    /// configuration's filter keys. Otherwise variables named in the filter
    /// keys are replaced by
    /// [`FILTERED_PLACEHOLDER`](builtin_filters::FILTERED_PLACEHOLDER).
    pub fn filter_local_variable(&self, name: &str, value: LocalValue) -> LocalValue {
        if self.callbacks.local_variable_filter().is_some() {
            self.callbacks
                .filter_local_variable(name, value, &self.filter_keys)
        } else {
            builtin_filters::redact_filtered_locals(name, value, &self.filter_keys)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{boxed::Box, string::ToString};

    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.callbacks().is_empty());
        assert_eq!(config.filter_keys(), &FilterKeys::with_defaults());
        assert!(config.project_root().is_none());
    }

    #[test]
    fn test_backtrace_without_root_passes_through() {
        let config = Config::new();
        assert!(matches!(
            config.filter_backtrace_line("/srv/app/a.rs:1"),
            Cow::Borrowed("/srv/app/a.rs:1")
        ));
    }

    #[test]
    fn test_project_root_fallback() {
        let config = Config::new().with_project_root("/srv/app");
        assert_eq!(
            config.filter_backtrace_line("/srv/app/a.rs:1"),
            "[PROJECT_ROOT]/a.rs:1"
        );
        assert_eq!(config.filter_backtrace_line("/lib/b.rs:2"), "/lib/b.rs:2");
    }

    #[test]
    fn test_root_fallback_matches_project_root_filter() {
        let config = Config::new().with_project_root("/srv/app");
        let filter = builtin_filters::project_root("/srv/app");
        for line in ["/srv/app/a.rs:1", "/srv/application/b.rs:2", "/lib/c.rs:3", ""] {
            assert_eq!(config.filter_backtrace_line(line), filter(line));
        }

        let empty_root = Config::new().with_project_root("");
        assert_eq!(empty_root.filter_backtrace_line("/srv/a.rs:1"), "/srv/a.rs:1");
    }

    #[test]
    fn test_backtrace_filter_takes_precedence_over_root() {
        let mut config = Config::new().with_project_root("/srv/app");
        config
            .callbacks_mut()
            .set_backtrace_filter(|line: &str| line.replace("/srv", "~"));
        assert_eq!(config.filter_backtrace_line("/srv/app/a.rs:1"), "~/app/a.rs:1");
    }

    #[test]
    fn test_default_local_redaction_uses_own_keys() {
        let mut config = Config::new();
        config.filter_keys_mut().insert("ssn");

        let redacted = config.filter_local_variable("SSN", Box::new("123".to_string()));
        assert_eq!(*redacted.downcast_ref::<&str>().unwrap(), "[FILTERED]");

        let kept = config.filter_local_variable("name", Box::new("bob".to_string()));
        assert_eq!(kept.downcast_ref::<String>().unwrap(), "bob");
    }

    #[test]
    fn test_custom_local_filter_receives_config_keys() {
        let callbacks = Callbacks::new().with_local_variable_filter(
            |_: &str, _: LocalValue, keys: &FilterKeys| -> LocalValue { Box::new(keys.len()) },
        );
        let config = Config::new()
            .with_callbacks(callbacks)
            .with_filter_keys(["a", "b", "c"].into_iter().collect());

        let value = config.filter_local_variable("anything", Box::new(()));
        assert_eq!(*value.downcast_ref::<usize>().unwrap(), 3);
    }

    #[test]
    fn test_into_callbacks_keeps_slots() {
        let mut config = Config::new();
        config
            .callbacks_mut()
            .set_exception_fingerprint(|notice: &Notice| notice.error_class.clone());
        let notice = Notice::new("Boom", "bang");
        assert_eq!(config.fingerprint(&notice).unwrap().as_str(), "Boom");

        let callbacks = config.into_callbacks();
        assert!(callbacks.exception_fingerprint().is_some());
        assert!(callbacks.backtrace_filter().is_none());
    }
}
