//! Ready-made callbacks for the common cases.
//!
//! Every item here is an ordinary closure or function, so it can be passed
//! straight to the matching [`Callbacks`](crate::Callbacks) setter.
//!
//! ```rust
//! use notice_callbacks::{Callbacks, builtin_filters};
//!
//! let callbacks = Callbacks::new()
//!     .with_backtrace_filter(builtin_filters::project_root("/srv/app"))
//!     .with_local_variable_filter(builtin_filters::redact_filtered_locals);
//!
//! assert_eq!(
//!     callbacks.filter_backtrace_line("/srv/app/src/lib.rs:7"),
//!     "[PROJECT_ROOT]/src/lib.rs:7"
//! );
//! ```

use alloc::{borrow::Cow, boxed::Box, string::String};

use crate::{
    filter_keys::FilterKeys,
    notice::{Exception, LocalValue},
};

/// Placeholder substituted for the project root in backtrace lines.
pub const PROJECT_ROOT_PLACEHOLDER: &str = "[PROJECT_ROOT]";

/// Value reported in place of a redacted local variable.
pub const FILTERED_PLACEHOLDER: &str = "[FILTERED]";

/// Backtrace filter removing `prefix` from the start of each line.
///
/// Lines that do not start with `prefix` are returned unchanged.
///
/// ```rust
/// use notice_callbacks::builtin_filters::strip_prefix;
///
/// let filter = strip_prefix("/app");
/// assert_eq!(filter("/app/lib/foo.rb:10"), "/lib/foo.rb:10");
/// assert_eq!(filter("/usr/lib/bar.rb:1"), "/usr/lib/bar.rb:1");
/// ```
pub fn strip_prefix(prefix: impl Into<String>) -> impl Fn(&str) -> String + Send + Sync + 'static {
    replace_prefix(prefix, "")
}

/// Backtrace filter replacing a leading `prefix` with `replacement`.
pub fn replace_prefix(
    prefix: impl Into<String>,
    replacement: impl Into<String>,
) -> impl Fn(&str) -> String + Send + Sync + 'static {
    let prefix = prefix.into();
    let replacement = replacement.into();
    move |line: &str| substitute_prefix(line, &prefix, &replacement).into_owned()
}

/// Replaces a leading `prefix` of `line` with `replacement`, borrowing `line`
/// when nothing changes. An empty prefix never matches.
pub(crate) fn substitute_prefix<'a>(
    line: &'a str,
    prefix: &str,
    replacement: &str,
) -> Cow<'a, str> {
    match line.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() => {
            let mut out = String::with_capacity(replacement.len() + rest.len());
            out.push_str(replacement);
            out.push_str(rest);
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(line),
    }
}

/// Backtrace filter replacing the project root with
/// [`PROJECT_ROOT_PLACEHOLDER`].
pub fn project_root(root: impl Into<String>) -> impl Fn(&str) -> String + Send + Sync + 'static {
    replace_prefix(root, PROJECT_ROOT_PLACEHOLDER)
}

/// Backtrace filter replacing every match of `pattern` with `replacement`.
///
/// `replacement` supports the usual `$name` capture group syntax.
#[cfg(feature = "regex")]
#[cfg_attr(docsrs, doc(cfg(feature = "regex")))]
pub fn replace_matches(
    pattern: regex::Regex,
    replacement: impl Into<String>,
) -> impl Fn(&str) -> String + Send + Sync + 'static {
    let replacement = replacement.into();
    move |line: &str| pattern.replace_all(line, replacement.as_str()).into_owned()
}

/// Local variable filter hiding every variable whose name is in the filter
/// keys behind [`FILTERED_PLACEHOLDER`].
pub fn redact_filtered_locals(
    name: &str,
    value: LocalValue,
    filter_keys: &FilterKeys,
) -> LocalValue {
    if filter_keys.contains(name) {
        Box::new(FILTERED_PLACEHOLDER)
    } else {
        value
    }
}

/// Exception filter suppressing every exception of type `E` and keeping all
/// others unchanged.
///
/// ```rust
/// use notice_callbacks::{Callbacks, builtin_filters::ignore_error};
///
/// let callbacks = Callbacks::new().with_exception_filter(ignore_error::<std::fmt::Error>());
/// assert!(callbacks.filter_exception(Box::new(std::fmt::Error)).is_none());
/// ```
pub fn ignore_error<E>() -> impl Fn(Exception) -> Option<Exception> + Send + Sync + 'static
where
    E: core::error::Error + 'static,
{
    |exception: Exception| {
        if exception.is::<E>() {
            None
        } else {
            Some(exception)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("ignored")]
    struct Ignored;

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("kept")]
    struct Kept;

    #[test]
    fn test_strip_prefix() {
        let filter = strip_prefix("/app");
        assert_eq!(filter("/app/lib/foo.rb:10"), "/lib/foo.rb:10");
        assert_eq!(filter("/application/x.rb:1"), "lication/x.rb:1");
        assert_eq!(filter("lib/foo.rb:10"), "lib/foo.rb:10");
    }

    #[test]
    fn test_empty_prefix_is_a_no_op() {
        let filter = replace_prefix("", "[ROOT]");
        assert_eq!(filter("src/main.rs:1"), "src/main.rs:1");
    }

    #[test]
    fn test_substitute_prefix_borrows_unchanged_lines() {
        assert!(matches!(
            substitute_prefix("/lib/a.rs:1", "/srv", "[ROOT]"),
            Cow::Borrowed("/lib/a.rs:1")
        ));
        assert!(matches!(
            substitute_prefix("/lib/a.rs:1", "", "[ROOT]"),
            Cow::Borrowed("/lib/a.rs:1")
        ));
        assert_eq!(substitute_prefix("/srv/a.rs:1", "/srv", "[ROOT]"), "[ROOT]/a.rs:1");
    }

    #[test]
    fn test_project_root() {
        let filter = project_root("/srv/app");
        assert_eq!(filter("/srv/app/src/lib.rs:7"), "[PROJECT_ROOT]/src/lib.rs:7");
        assert_eq!(filter("/rustc/abc/library/core.rs:1"), "/rustc/abc/library/core.rs:1");
    }

    #[cfg(feature = "regex")]
    #[test]
    fn test_replace_matches() {
        let pattern = regex::Regex::new(r"/home/[^/]+/").unwrap();
        let filter = replace_matches(pattern, "~/");
        assert_eq!(filter("/home/alice/src/a.rs:1"), "~/src/a.rs:1");
        assert_eq!(filter("/opt/b.rs:2"), "/opt/b.rs:2");
    }

    #[test]
    fn test_redact_filtered_locals() {
        let keys = FilterKeys::with_defaults();

        let redacted = redact_filtered_locals("Password", Box::new("hunter2".to_string()), &keys);
        assert_eq!(*redacted.downcast_ref::<&str>().unwrap(), FILTERED_PLACEHOLDER);

        let kept = redact_filtered_locals("user", Box::new("alice".to_string()), &keys);
        assert_eq!(kept.downcast_ref::<String>().unwrap(), "alice");
    }

    #[test]
    fn test_ignore_error() {
        let filter = ignore_error::<Ignored>();
        assert!(filter(Box::new(Ignored)).is_none());
        assert_eq!(filter(Box::new(Kept)).unwrap().to_string(), "kept");
    }
}
