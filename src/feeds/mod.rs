//! Stateful feeds over the request cache
//!
//! Each feed owns the data accumulated for one kind of view and reads the
//! backend exclusively through a shared [`RequestCache`](crate::cache::RequestCache).

pub mod by_employee;
pub mod employees;
pub mod paginated;

pub use by_employee::EmployeeTransactionFeed;
pub use employees::EmployeeDirectory;
pub use paginated::PaginatedTransactionFeed;

/// Feed state tagged with an invalidation generation.
///
/// A fetch records the generation when it starts and may only write its
/// result back if no invalidation happened in between.
#[derive(Debug, Default)]
pub(crate) struct Tracked<T> {
    value: T,
    generation: u64,
}

impl<T: Default> Tracked<T> {
    pub(crate) fn get(&self) -> &T {
        &self.value
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Reset to the empty state and orphan every outstanding fetch.
    pub(crate) fn reset(&mut self) {
        self.value = T::default();
        self.generation += 1;
    }

    /// Orphan outstanding fetches without touching the data.
    pub(crate) fn supersede(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply `update` if `generation` is still current. Returns whether it ran.
    pub(crate) fn apply(&mut self, generation: u64, update: impl FnOnce(&mut T)) -> bool {
        if generation != self.generation {
            return false;
        }
        update(&mut self.value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_after_reset_is_discarded() {
        let mut tracked: Tracked<Option<u32>> = Tracked::default();
        let started = tracked.generation();

        tracked.reset();

        assert!(!tracked.apply(started, |v| *v = Some(1)));
        assert_eq!(*tracked.get(), None);
    }

    #[test]
    fn test_supersede_keeps_data() {
        let mut tracked: Tracked<Option<u32>> = Tracked::default();
        assert!(tracked.apply(0, |v| *v = Some(1)));

        let latest = tracked.supersede();

        assert_eq!(*tracked.get(), Some(1));
        assert!(!tracked.apply(0, |v| *v = Some(2)));
        assert!(tracked.apply(latest, |v| *v = Some(3)));
        assert_eq!(*tracked.get(), Some(3));
    }
}
