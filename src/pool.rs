//! Fixed-capacity slot pools for transient entities.
//!
//! Enemies, projectiles and pickups are plain records recycled through a
//! pool rather than allocated per spawn. Acquisition fails softly when the
//! pool is saturated: the caller skips the spawn for that tick and retries
//! on the next eligible one.

/// Index-based handle into a [`Pool`]. Valid until the slot is released;
/// a released handle must not be read again until re-acquired.
pub type SlotId = usize;

struct Slot<T> {
    active: bool,
    data: T,
}

/// A fixed-capacity pool of reusable `T` slots.
///
/// Releasing a slot only marks it inactive; the record keeps its previous
/// contents until the next `acquire` overwrites them.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    active_count: usize,
}

impl<T: Default> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot {
            active: false,
            data: T::default(),
        });
        Self { slots, active_count: 0 }
    }
}

impl<T> Pool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_full(&self) -> bool {
        self.active_count == self.slots.len()
    }

    /// Claims a free slot and initializes it with `data`.
    ///
    /// Returns `None` when every slot is active; the caller must treat this
    /// as "skip the spawn this tick", never as a retry loop.
    pub fn acquire(&mut self, data: T) -> Option<SlotId> {
        let id = self.slots.iter().position(|slot| !slot.active)?;
        self.slots[id] = Slot { active: true, data };
        self.active_count += 1;
        Some(id)
    }

    /// Marks a slot inactive, making it available for reuse. Releasing an
    /// already-inactive slot is a no-op.
    pub fn release(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id) {
            if slot.active {
                slot.active = false;
                self.active_count -= 1;
            }
        }
    }

    /// Releases every slot at once. Used on run teardown.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.active_count = 0;
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id).filter(|slot| slot.active).map(|slot| &slot.data)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id)
            .filter(|slot| slot.active)
            .map(|slot| &mut slot.data)
    }

    /// Iterates active slots in index order. The order is unspecified from
    /// the caller's perspective but stable within a tick.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(id, slot)| (id, &slot.data))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(id, slot)| (id, &mut slot.data))
    }

    /// Collects the ids of active slots satisfying `predicate`. Useful when
    /// resolution needs to release slots while iterating.
    pub fn active_ids_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<SlotId> {
        self.iter_active()
            .filter(|(_, data)| predicate(data))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_up_to_capacity() {
        let mut pool: Pool<u32> = Pool::new(3);
        assert!(pool.acquire(1).is_some());
        assert!(pool.acquire(2).is_some());
        assert!(pool.acquire(3).is_some());
        assert!(pool.acquire(4).is_none());
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_release_recycles_slot() {
        let mut pool: Pool<u32> = Pool::new(1);
        let id = pool.acquire(7).unwrap();
        assert!(pool.is_full());
        pool.release(id);
        assert_eq!(pool.active_count(), 0);
        let id2 = pool.acquire(9).unwrap();
        assert_eq!(pool.get(id2), Some(&9));
    }

    #[test]
    fn test_released_slot_is_not_visible() {
        let mut pool: Pool<u32> = Pool::new(2);
        let id = pool.acquire(5).unwrap();
        pool.release(id);
        assert!(pool.get(id).is_none());
        assert_eq!(pool.iter_active().count(), 0);
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut pool: Pool<u32> = Pool::new(2);
        let id = pool.acquire(5).unwrap();
        pool.release(id);
        pool.release(id);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let mut pool: Pool<u32> = Pool::new(4);
        for value in [10, 20, 30, 40] {
            pool.acquire(value);
        }
        pool.release(1);
        let seen: Vec<u32> = pool.iter_active().map(|(_, v)| *v).collect();
        assert_eq!(seen, vec![10, 30, 40]);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut pool: Pool<u32> = Pool::new(8);
        for value in 0..8 {
            pool.acquire(value);
        }
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert!(pool.acquire(99).is_some());
    }
}
