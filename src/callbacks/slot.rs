use core::fmt;

use triomphe::Arc;

/// A single extension point: empty, or holding exactly one callback.
///
/// Setting always overwrites. There is no way back to the empty state.
pub(crate) struct Slot<T: ?Sized + Send + Sync + 'static> {
    name: &'static str,
    callback: Option<Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Slot<T> {
    #[must_use]
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            callback: None,
        }
    }

    #[inline]
    pub(crate) fn get(&self) -> Option<&Arc<T>> {
        self.callback.as_ref()
    }

    pub(crate) fn set(&mut self, callback: Arc<T>) {
        let previous = self.callback.replace(callback);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            slot = self.name,
            overwritten = previous.is_some(),
            "callback registered"
        );

        drop(previous);
    }

    #[inline]
    pub(crate) fn is_set(&self) -> bool {
        self.callback.is_some()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            callback: self.callback.clone(),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.callback {
            Some(callback) => write!(f, "{}: set({:p})", self.name, &**callback),
            None => write!(f, "{}: empty", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use unsize::CoerceUnsize;

    use super::*;

    trait Doubler: Send + Sync + 'static {
        fn double(&self, x: u32) -> u32;
    }

    struct Times(u32);

    impl Doubler for Times {
        fn double(&self, x: u32) -> u32 {
            x * self.0
        }
    }

    fn doubler(factor: u32) -> Arc<dyn Doubler> {
        Arc::new(Times(factor)).unsize(unsize::Coercion!(to dyn Doubler))
    }

    #[test]
    fn test_slot_starts_empty() {
        let slot: Slot<dyn Doubler> = Slot::new("doubler");
        assert!(!slot.is_set());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_slot_last_write_wins() {
        let mut slot: Slot<dyn Doubler> = Slot::new("doubler");
        let first = doubler(2);
        let second = doubler(3);

        slot.set(first.clone());
        assert!(Arc::ptr_eq(slot.get().unwrap(), &first));

        slot.set(second.clone());
        assert!(Arc::ptr_eq(slot.get().unwrap(), &second));
        assert!(!Arc::ptr_eq(slot.get().unwrap(), &first));
        assert_eq!(slot.get().unwrap().double(7), 21);
    }

    #[test]
    fn test_slot_clone_shares_callback() {
        let mut slot: Slot<dyn Doubler> = Slot::new("doubler");
        slot.set(doubler(2));
        let cloned = slot.clone();
        assert!(Arc::ptr_eq(slot.get().unwrap(), cloned.get().unwrap()));
    }
}
