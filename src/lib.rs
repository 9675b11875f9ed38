#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Callback hooks for customizing an error-reporting client.
//!
//! ## Overview
//!
//! An error-reporting client has a few places where applications want a say:
//! how backtrace lines are printed, which exceptions are not worth reporting,
//! how reports are grouped, and which local variables must never leave the
//! process. This crate is the registry for those callbacks. It stores at most
//! one callback per extension point and hands it back when the reporting
//! pipeline asks for it.
//!
//! ## Quick Example
//!
//! ```
//! use notice_callbacks::{Callbacks, Notice, builtin_filters};
//!
//! let mut callbacks = Callbacks::new();
//! callbacks
//!     .set_backtrace_filter(builtin_filters::strip_prefix("/app"))
//!     .set_exception_fingerprint(|notice: &Notice| {
//!         format!("{}:{}", notice.error_class, notice.component.as_deref().unwrap_or(""))
//!     });
//!
//! assert_eq!(callbacks.filter_backtrace_line("/app/lib/foo.rb:10"), "/lib/foo.rb:10");
//!
//! let notice = Notice::new("TimeoutError", "upstream took too long").with_component("billing");
//! assert_eq!(callbacks.fingerprint(&notice).unwrap().as_str(), "TimeoutError:billing");
//! ```
//!
//! ## Extension points
//!
//! | Slot | Called with | Result |
//! |---|---|---|
//! | backtrace filter | one backtrace line | the line to report |
//! | exception filter | the captured [`Exception`] | `Some` to report, `None` to suppress |
//! | exception fingerprint | the assembled [`Notice`] | any `Display` value, used as grouping key |
//! | local variable filter | name, raw value, [`FilterKeys`] | the value to report |
//!
//! Setting a slot always replaces its previous callback. Slots can't be
//! cleared and never chain several callbacks.
//!
//! ## Configuration
//!
//! Callbacks are meant to be registered once, during startup. A [`Callbacks`]
//! value can be owned by a [`Config`], or installed process-wide with
//! [`Callbacks::install`] and read back with [`Callbacks::fetch_current`].
//! Installed registries are immutable; build a new one and call
//! [`Callbacks::replace`] to change them.
//!
//! ## Features
//!
//! - `std` (default): use `std::sync::RwLock` for the global registry instead
//!   of a spin lock.
//! - `regex`: adds `builtin_filters::replace_matches`, a regex-based backtrace
//!   filter.
//! - `tracing`: emits `tracing` debug events when callbacks are registered or
//!   the global registry changes.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod builtin_filters;
pub mod callbacks;
mod config;
pub mod filter_keys;
pub mod notice;

pub use self::{
    callbacks::{Callbacks, CallbacksAlreadyInstalledError},
    config::Config,
    filter_keys::FilterKeys,
    notice::{Exception, Fingerprint, LocalValue, Notice},
};
