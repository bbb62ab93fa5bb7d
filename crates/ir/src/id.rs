//! Identity allocation
//!
//! One counter hands out ids for entities, attributes and relations alike.
//! Ids are never reused while the allocator lives, and an allocator built
//! for an existing schema starts above every id already present in it.

/// Monotonic id source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Allocator whose first id is 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocator whose first id is `max + 1`
    ///
    /// `None` when `max` is `u64::MAX` and no id is left above it.
    pub fn seeded_above(max: u64) -> Option<Self> {
        max.checked_add(1).map(|next| Self { next })
    }

    /// Issue the next id
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        match id.checked_add(1) {
            Some(next) => self.next = next,
            None => tracing::error!(id, "id space exhausted"),
        }
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdAllocator::new();
        let issued: Vec<u64> = (0..100).map(|_| ids.next_id()).collect();
        assert!(issued.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(issued.iter().collect::<HashSet<_>>().len(), 100);
    }

    #[test]
    fn test_seeded_above() {
        let mut ids = IdAllocator::seeded_above(6).unwrap();
        assert_eq!(ids.next_id(), 7);
        assert_eq!(ids.next_id(), 8);
    }

    #[test]
    fn test_no_room_above_max_id() {
        assert!(IdAllocator::seeded_above(u64::MAX).is_none());

        let mut ids = IdAllocator::seeded_above(u64::MAX - 1).unwrap();
        assert_eq!(ids.next_id(), u64::MAX);
    }
}
