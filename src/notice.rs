//! Data handed to callbacks by the reporting pipeline.
//!
//! The registry never inspects these types. They only fix the shapes that the
//! stored callbacks are called with.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::{any::Any, fmt};

/// A captured exception, as seen by the exception filter.
///
/// This is an owned, type-erased error. Filters can test the concrete type
/// with `is` or `downcast_ref` and either hand the same
/// box back or drop it.
pub type Exception = Box<dyn core::error::Error + Send + Sync + 'static>;

/// The raw value of a captured local variable.
pub type LocalValue = Box<dyn Any + Send + Sync + 'static>;

/// An assembled error report, passed to the fingerprint generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    /// Name of the error type, e.g. `"std::io::Error"`.
    pub error_class: String,
    /// The rendered error message.
    pub error_message: String,
    /// The component (controller, job, module) the error happened in.
    pub component: Option<String>,
    /// The action within the component, if known.
    pub action: Option<String>,
    /// Already-filtered backtrace lines, most recent first.
    pub backtrace: Vec<String>,
}

impl Notice {
    /// Creates a notice for the given error class and message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notice_callbacks::notice::Notice;
    ///
    /// let notice = Notice::new("TimeoutError", "upstream took too long")
    ///     .with_component("billing");
    /// assert_eq!(notice.component.as_deref(), Some("billing"));
    /// ```
    pub fn new(error_class: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_class: error_class.into(),
            error_message: error_message.into(),
            ..Self::default()
        }
    }

    /// Creates a notice from an [`Exception`], using its type-erased
    /// `Display` output as the message.
    ///
    /// The error class has to be supplied by the caller since it cannot be
    /// recovered from a trait object.
    pub fn from_exception(error_class: impl Into<String>, exception: &Exception) -> Self {
        Self::new(error_class, alloc::format!("{exception}"))
    }

    /// Sets the component.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Sets the action.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the backtrace lines.
    #[must_use]
    pub fn with_backtrace<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// A custom grouping key produced by a fingerprint generator.
///
/// Generators may return anything implementing [`Display`](fmt::Display);
/// the registry renders it once with `to_string` and stores only the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Renders `value` into a fingerprint.
    pub fn new(value: impl fmt::Display) -> Self {
        Self(alloc::string::ToString::to_string(&value))
    }

    /// The rendered fingerprint.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fingerprint, returning the rendered text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}
