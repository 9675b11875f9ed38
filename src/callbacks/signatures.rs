//! The stored form of each callback.
//!
//! Each slot stores its callback as a trait object of one of these traits.
//! Every matching closure implements the corresponding trait through a blanket
//! impl, so users normally only write closures. The traits exist so the
//! registry can coerce `Arc<F>` into one named `dyn` type per slot.

use alloc::string::String;
use core::fmt;

use crate::{
    filter_keys::FilterKeys,
    notice::{Exception, Fingerprint, LocalValue, Notice},
};

/// Rewrites a single backtrace line.
pub trait BacktraceFilter: 'static + Send + Sync {
    /// Returns the line as it should appear in the report.
    fn filter_line(&self, line: &str) -> String;
}

impl<F> BacktraceFilter for F
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    #[inline]
    fn filter_line(&self, line: &str) -> String {
        self(line)
    }
}

/// Decides whether an exception is reported.
pub trait ExceptionFilter: 'static + Send + Sync {
    /// Returns `Some` (normally the same exception) to keep reporting it, or
    /// `None` to suppress the report.
    fn filter_exception(&self, exception: Exception) -> Option<Exception>;
}

impl<F> ExceptionFilter for F
where
    F: Fn(Exception) -> Option<Exception> + Send + Sync + 'static,
{
    #[inline]
    fn filter_exception(&self, exception: Exception) -> Option<Exception> {
        self(exception)
    }
}

/// Computes a custom grouping key for a notice.
///
/// Closures may return any [`Display`](fmt::Display) value; it is rendered
/// into a [`Fingerprint`] right away.
pub trait FingerprintGenerator: 'static + Send + Sync {
    /// Computes the fingerprint for `notice`.
    fn fingerprint(&self, notice: &Notice) -> Fingerprint;
}

impl<F, D> FingerprintGenerator for F
where
    F: Fn(&Notice) -> D + Send + Sync + 'static,
    D: fmt::Display,
{
    #[inline]
    fn fingerprint(&self, notice: &Notice) -> Fingerprint {
        Fingerprint::new(self(notice))
    }
}

/// Redacts or transforms the value of a captured local variable.
pub trait LocalVariableFilter: 'static + Send + Sync {
    /// Returns the value to embed in the report for the variable `name`.
    ///
    /// `filter_keys` holds the names that default redaction would hide.
    fn filter_local(&self, name: &str, value: LocalValue, filter_keys: &FilterKeys) -> LocalValue;
}

impl<F> LocalVariableFilter for F
where
    F: Fn(&str, LocalValue, &FilterKeys) -> LocalValue + Send + Sync + 'static,
{
    #[inline]
    fn filter_local(&self, name: &str, value: LocalValue, filter_keys: &FilterKeys) -> LocalValue {
        self(name, value, filter_keys)
    }
}
