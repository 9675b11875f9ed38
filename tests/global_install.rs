//! The global registry is process-wide state, so everything touching it lives
//! in this one test binary and runs as a single test.

use notice_callbacks::{Callbacks, Notice};

#[test]
fn install_replace_and_fetch() {
    assert!(Callbacks::fetch_current().is_none());

    Callbacks::new()
        .with_exception_fingerprint(|notice: &Notice| format!("first:{}", notice.error_class))
        .install()
        .expect("nothing is installed yet");

    let notice = Notice::new("Timeout", "slow");
    let first = Callbacks::fetch_current().expect("just installed");
    assert_eq!(first.fingerprint(&notice).unwrap().as_str(), "first:Timeout");

    let again = Callbacks::fetch_current().unwrap();
    assert!(triomphe::Arc::ptr_eq(&first, &again));

    let rejected = Callbacks::new()
        .with_backtrace_filter(|line: &str| line.to_uppercase())
        .install()
        .unwrap_err();
    assert_eq!(rejected.to_string(), "callbacks are already installed globally");
    assert!(rejected.0.backtrace_filter().is_some());
    assert!(Callbacks::fetch_current().unwrap().backtrace_filter().is_none());

    let previous = Callbacks::new()
        .with_exception_fingerprint(|notice: &Notice| format!("second:{}", notice.error_class))
        .replace()
        .expect("a registry was installed");
    assert!(triomphe::Arc::ptr_eq(&previous, &first));

    let current = Callbacks::fetch_current().unwrap();
    assert_eq!(current.fingerprint(&notice).unwrap().as_str(), "second:Timeout");
    // Handles taken before the swap still see the old callbacks.
    assert_eq!(first.fingerprint(&notice).unwrap().as_str(), "first:Timeout");
}
