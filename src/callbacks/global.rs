//! Process-wide installation of a [`Callbacks`] registry.

#[cfg(feature = "std")]
use std::sync as impl_;

use triomphe::Arc;
#[cfg(not(feature = "std"))]
use spin as impl_;

use super::Callbacks;

#[repr(transparent)]
struct CallbackLock(impl_::RwLock<Option<Arc<Callbacks>>>);

impl CallbackLock {
    #[must_use]
    const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    /// Runs `f` with shared access to the installed registry.
    ///
    /// A poisoned lock is still readable: writers only ever swap the `Option`,
    /// which cannot leave it half-written.
    #[inline]
    fn read<R>(&'static self, f: impl FnOnce(&Option<Arc<Callbacks>>) -> R) -> R {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(impl_::PoisonError::into_inner);

        f(&guard)
    }

    #[inline]
    fn write<R>(&'static self, f: impl FnOnce(&mut Option<Arc<Callbacks>>) -> R) -> R {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self.0.write().unwrap_or_else(impl_::PoisonError::into_inner);

        f(&mut guard)
    }
}

static CALLBACKS: CallbackLock = CallbackLock::new();

/// Error returned when attempting to install callbacks when a registry is
/// already installed.
///
/// Contains the callbacks that were attempted to be installed, allowing you to
/// recover them if needed.
pub struct CallbacksAlreadyInstalledError(pub Callbacks);

impl core::fmt::Debug for CallbacksAlreadyInstalledError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CallbacksAlreadyInstalledError").finish()
    }
}

impl core::fmt::Display for CallbacksAlreadyInstalledError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "callbacks are already installed globally")
    }
}

impl core::error::Error for CallbacksAlreadyInstalledError {}

impl Callbacks {
    /// Installs the callbacks globally.
    ///
    /// If a registry is already installed, returns an error
    /// [`CallbacksAlreadyInstalledError`] containing the callbacks that were
    /// attempted to be installed.
    ///
    /// See also [`replace`](Self::replace) which will replace any existing
    /// registry without erroring.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notice_callbacks::Callbacks;
    ///
    /// Callbacks::new()
    ///     .with_backtrace_filter(|line: &str| line.to_owned())
    ///     .install()
    ///     .expect("failed to install callbacks");
    ///
    /// // Second installation fails
    /// let rejected = Callbacks::new().install().unwrap_err();
    /// assert!(rejected.0.is_empty());
    /// ```
    pub fn install(self) -> Result<(), CallbacksAlreadyInstalledError> {
        CALLBACKS.write(|installed| {
            if installed.is_some() {
                return Err(CallbacksAlreadyInstalledError(self));
            }
            *installed = Some(Arc::new(self));

            #[cfg(feature = "tracing")]
            tracing::debug!("callbacks installed");

            Ok(())
        })
    }

    /// Installs the callbacks globally, replacing any installed registry.
    ///
    /// Returns the previously installed registry, if any. Code that fetched
    /// the previous registry keeps its handle until it drops it.
    pub fn replace(self) -> Option<Arc<Callbacks>> {
        let previous = CALLBACKS.write(|installed| installed.replace(Arc::new(self)));

        #[cfg(feature = "tracing")]
        tracing::debug!(had_previous = previous.is_some(), "callbacks replaced");

        previous
    }

    /// Fetches the currently installed registry, if any.
    pub fn fetch_current() -> Option<Arc<Callbacks>> {
        CALLBACKS.read(Option::clone)
    }
}
