//! The callback registry.
//!
//! # Quick Start
//!
//! ```rust
//! use notice_callbacks::Callbacks;
//!
//! let callbacks = Callbacks::new()
//!     .with_backtrace_filter(|line: &str| line.replace("/home/deploy/app", "[PROJECT_ROOT]"))
//!     .with_exception_fingerprint(|notice: &notice_callbacks::Notice| {
//!         format!("{}:{}", notice.error_class, notice.component.as_deref().unwrap_or("-"))
//!     });
//!
//! assert_eq!(
//!     callbacks.filter_backtrace_line("/home/deploy/app/src/main.rs:3"),
//!     "[PROJECT_ROOT]/src/main.rs:3"
//! );
//! ```
//!
//! # Slots
//!
//! A [`Callbacks`] value has four independent slots:
//!
//! - **backtrace filter**: called once per backtrace line while the lines are
//!   formatted.
//! - **exception filter**: called once per captured exception before a report
//!   is built. Returning `None` suppresses the report.
//! - **exception fingerprint**: called once per report with the assembled
//!   [`Notice`] to compute a custom grouping key.
//! - **local variable filter**: called once per captured local variable with
//!   its name, raw value and the default [`FilterKeys`].
//!
//! Each slot is either empty or holds exactly one callback. Setting a slot
//! replaces whatever it held before; callbacks are never chained. There is no
//! way to clear a slot.
//!
//! Configure callbacks during setup, before the pipeline starts reading them.
//! The setters take `&mut self`, so a registry shared behind an `Arc` (or
//! installed globally with [`Callbacks::install`]) can no longer change.

mod global;
mod signatures;
mod slot;

use alloc::{borrow::Cow, boxed::Box, string::String};

use triomphe::Arc;
use unsize::CoerceUnsize;

pub use self::{
    global::CallbacksAlreadyInstalledError,
    signatures::{BacktraceFilter, ExceptionFilter, FingerprintGenerator, LocalVariableFilter},
};
use self::slot::Slot;
use crate::{
    filter_keys::FilterKeys,
    notice::{Exception, Fingerprint, LocalValue, Notice},
};

/// Registry holding at most one callback per extension point.
///
/// All slots start empty. See the [module documentation](self) for what each
/// slot is used for.
///
/// # Examples
///
/// ```rust
/// use notice_callbacks::{Callbacks, notice::Exception};
///
/// #[derive(Debug)]
/// struct Expected;
///
/// impl std::fmt::Display for Expected {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "expected failure")
///     }
/// }
///
/// impl std::error::Error for Expected {}
///
/// let mut callbacks = Callbacks::new();
/// assert!(callbacks.exception_filter().is_none());
///
/// callbacks.set_exception_filter(|exception: Exception| {
///     if exception.is::<Expected>() { None } else { Some(exception) }
/// });
///
/// assert!(callbacks.filter_exception(Box::new(Expected)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Callbacks(Box<CallbackData>);

#[derive(Clone, Debug)]
struct CallbackData {
    backtrace_filter: Slot<dyn BacktraceFilter>,
    exception_filter: Slot<dyn ExceptionFilter>,
    exception_fingerprint: Slot<dyn FingerprintGenerator>,
    local_variable_filter: Slot<dyn LocalVariableFilter>,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl Callbacks {
    /// Creates a registry with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self(Box::new(CallbackData {
            backtrace_filter: Slot::new("backtrace_filter"),
            exception_filter: Slot::new("exception_filter"),
            exception_fingerprint: Slot::new("exception_fingerprint"),
            local_variable_filter: Slot::new("local_variable_filter"),
        }))
    }

    /// Whether no slot has been set yet.
    pub fn is_empty(&self) -> bool {
        !(self.0.backtrace_filter.is_set()
            || self.0.exception_filter.is_set()
            || self.0.exception_fingerprint.is_set()
            || self.0.local_variable_filter.is_set())
    }

    /// The stored backtrace filter, if any.
    pub fn backtrace_filter(&self) -> Option<&Arc<dyn BacktraceFilter>> {
        self.0.backtrace_filter.get()
    }

    /// Stores `filter` as the backtrace filter, replacing any previous one.
    ///
    /// The filter receives each backtrace line and returns the line to report
    /// in its place.
    pub fn set_backtrace_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let filter = Arc::new(filter).unsize(unsize::Coercion!(to dyn BacktraceFilter));
        self.0.backtrace_filter.set(filter);
        self
    }

    /// Builder form of [`set_backtrace_filter`](Self::set_backtrace_filter).
    #[must_use]
    pub fn with_backtrace_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.set_backtrace_filter(filter);
        self
    }

    /// The stored exception filter, if any.
    pub fn exception_filter(&self) -> Option<&Arc<dyn ExceptionFilter>> {
        self.0.exception_filter.get()
    }

    /// Stores `filter` as the exception filter, replacing any previous one.
    ///
    /// The filter receives each captured exception. Returning `Some` keeps the
    /// exception (usually unchanged); returning `None` suppresses the report.
    pub fn set_exception_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(Exception) -> Option<Exception> + Send + Sync + 'static,
    {
        let filter = Arc::new(filter).unsize(unsize::Coercion!(to dyn ExceptionFilter));
        self.0.exception_filter.set(filter);
        self
    }

    /// Builder form of [`set_exception_filter`](Self::set_exception_filter).
    #[must_use]
    pub fn with_exception_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Exception) -> Option<Exception> + Send + Sync + 'static,
    {
        self.set_exception_filter(filter);
        self
    }

    /// The stored fingerprint generator, if any.
    pub fn exception_fingerprint(&self) -> Option<&Arc<dyn FingerprintGenerator>> {
        self.0.exception_fingerprint.get()
    }

    /// Stores `generator` as the fingerprint generator, replacing any previous
    /// one.
    ///
    /// The generator may return anything that implements `Display`; the value
    /// is rendered with `to_string` each time a fingerprint is computed.
    pub fn set_exception_fingerprint<F, D>(&mut self, generator: F) -> &mut Self
    where
        F: Fn(&Notice) -> D + Send + Sync + 'static,
        D: core::fmt::Display,
    {
        let generator =
            Arc::new(generator).unsize(unsize::Coercion!(to dyn FingerprintGenerator));
        self.0.exception_fingerprint.set(generator);
        self
    }

    /// Builder form of
    /// [`set_exception_fingerprint`](Self::set_exception_fingerprint).
    #[must_use]
    pub fn with_exception_fingerprint<F, D>(mut self, generator: F) -> Self
    where
        F: Fn(&Notice) -> D + Send + Sync + 'static,
        D: core::fmt::Display,
    {
        self.set_exception_fingerprint(generator);
        self
    }

    /// The stored local variable filter, if any.
    pub fn local_variable_filter(&self) -> Option<&Arc<dyn LocalVariableFilter>> {
        self.0.local_variable_filter.get()
    }

    /// Stores `filter` as the local variable filter, replacing any previous
    /// one.
    ///
    /// The value the filter returns is what gets reported for the variable.
    pub fn set_local_variable_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&str, LocalValue, &FilterKeys) -> LocalValue + Send + Sync + 'static,
    {
        let filter = Arc::new(filter).unsize(unsize::Coercion!(to dyn LocalVariableFilter));
        self.0.local_variable_filter.set(filter);
        self
    }

    /// Builder form of
    /// [`set_local_variable_filter`](Self::set_local_variable_filter).
    #[must_use]
    pub fn with_local_variable_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, LocalValue, &FilterKeys) -> LocalValue + Send + Sync + 'static,
    {
        self.set_local_variable_filter(filter);
        self
    }

    /// Runs the backtrace filter on `line`, or returns it unchanged if no
    /// filter is set.
    pub fn filter_backtrace_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match self.backtrace_filter() {
            Some(filter) => Cow::Owned(filter.filter_line(line)),
            None => Cow::Borrowed(line),
        }
    }

    /// Runs the exception filter, or keeps the exception if no filter is set.
    pub fn filter_exception(&self, exception: Exception) -> Option<Exception> {
        match self.exception_filter() {
            Some(filter) => filter.filter_exception(exception),
            None => Some(exception),
        }
    }

    /// Computes the custom fingerprint for `notice`. `None` means no
    /// generator is set and default grouping applies.
    pub fn fingerprint(&self, notice: &Notice) -> Option<Fingerprint> {
        self.exception_fingerprint()
            .map(|generator| generator.fingerprint(notice))
    }

    /// Runs the local variable filter, or returns `value` unchanged if no
    /// filter is set.
    pub fn filter_local_variable(
        &self,
        name: &str,
        value: LocalValue,
        filter_keys: &FilterKeys,
    ) -> LocalValue {
        match self.local_variable_filter() {
            Some(filter) => filter.filter_local(name, value, filter_keys),
            None => value,
        }
    }
}
