//! Mark-and-sweep garbage collector.
//!
//! The collector's registry is the sole owner of every heap [`Object`]: a
//! slot arena addressed by stable [`ObjectRef`] handles. The VM's operand
//! stack holds non-owning handles into this arena, which turns "does this
//! object still have an owner" into "is this slot still occupied" and makes
//! use-after-free unrepresentable outside of a logic error.
//!
//! Collection is synchronous: the VM invokes [`collect`](GarbageCollector::collect)
//! between two instruction steps with the operand stack as the root set, so
//! the roots are a quiesced snapshot. Objects hold no references to other
//! objects, so the mark phase is O(roots) with no transitive traversal.

use crate::object::Object;

/// Stable handle to a registry slot.
///
/// Handle identity is object identity: two handles compare equal exactly
/// when they name the same heap object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectRef(u32);

/// An occupied registry slot: the owned object plus its reachability mark.
///
/// The mark is meaningful only during a collection cycle and is reset to
/// unreached before the cycle completes.
#[derive(Debug)]
struct Slot {
    object: Object,
    marked: bool,
}

/// Counters reported after a completed collection cycle.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CollectionStats {
    /// Objects reclaimed by the sweep phase.
    pub reclaimed: usize,
    /// Objects surviving the cycle.
    pub live: usize,
}

/// Registry of all live heap objects plus the mark-and-sweep algorithm.
#[derive(Debug, Default)]
pub struct GarbageCollector {
    /// Slot arena; `None` entries are swept slots awaiting reuse.
    slots: Vec<Option<Slot>>,
    /// Indices of swept slots, reused before the arena grows.
    free: Vec<u32>,
    /// Occupied slot count.
    live: usize,
    /// Completed collection cycles.
    cycles: u64,
}

impl GarbageCollector {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `object`, registering it for collection.
    ///
    /// Returns the handle that names the object for the rest of its life.
    pub fn track(&mut self, object: Object) -> ObjectRef {
        self.live += 1;
        let slot = Slot {
            object,
            marked: false,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(slot);
                ObjectRef(index)
            }
            None => {
                self.slots.push(Some(slot));
                ObjectRef((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Returns the object behind `handle`.
    ///
    /// Every handle on the operand stack is kept alive by each collection
    /// cycle, so a stack-held handle always resolves. Resolving a handle
    /// whose object was swept is a logic error and panics.
    pub fn get(&self, handle: ObjectRef) -> &Object {
        match &self.slots[handle.0 as usize] {
            Some(slot) => &slot.object,
            None => panic!("dangling object handle {handle:?}"),
        }
    }

    /// Returns the number of live objects in the registry.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Returns how many collection cycles have completed.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs one mark-and-sweep cycle against the given root set.
    ///
    /// Marks every root-referenced slot, then sweeps: unmarked slots are
    /// reclaimed and queued for reuse, marked slots have their flag reset.
    /// Afterwards the registry holds exactly the objects reachable from
    /// `roots`.
    pub fn collect(&mut self, roots: &[ObjectRef]) -> CollectionStats {
        // Mark phase: roots only, no traversal (objects are leaf values).
        for root in roots {
            if let Some(slot) = &mut self.slots[root.0 as usize] {
                slot.marked = true;
            }
        }

        // Sweep phase.
        let mut reclaimed = 0;
        for (index, entry) in self.slots.iter_mut().enumerate() {
            match entry {
                Some(slot) if slot.marked => slot.marked = false,
                Some(_) => {
                    *entry = None;
                    self.free.push(index as u32);
                    reclaimed += 1;
                }
                None => {}
            }
        }

        self.live -= reclaimed;
        self.cycles += 1;
        let stats = CollectionStats {
            reclaimed,
            live: self.live,
        };
        crate::info!(
            "[GC] cycle {} finished: reclaimed {}, live {}",
            self.cycles,
            stats.reclaimed,
            stats.live
        );
        stats
    }

    /// Drops every object and resets the registry to its initial state.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
        self.cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_and_get() {
        let mut gc = GarbageCollector::new();
        let a = gc.track(Object::Number(1.0));
        let b = gc.track(Object::Str("x".into()));
        assert_eq!(gc.get(a), &Object::Number(1.0));
        assert_eq!(gc.get(b), &Object::Str("x".into()));
        assert_eq!(gc.live(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn collect_reclaims_unrooted_objects() {
        let mut gc = GarbageCollector::new();
        let a = gc.track(Object::Number(1.0));
        let _b = gc.track(Object::Number(2.0));
        let c = gc.track(Object::Number(3.0));

        let stats = gc.collect(&[a, c]);
        assert_eq!(stats.reclaimed, 1);
        assert_eq!(stats.live, 2);
        assert_eq!(gc.live(), 2);
        assert_eq!(gc.get(a), &Object::Number(1.0));
        assert_eq!(gc.get(c), &Object::Number(3.0));
    }

    #[test]
    fn collect_with_empty_roots_reclaims_everything() {
        let mut gc = GarbageCollector::new();
        gc.track(Object::Number(1.0));
        gc.track(Object::Null);

        let stats = gc.collect(&[]);
        assert_eq!(stats.reclaimed, 2);
        assert_eq!(stats.live, 0);
        assert_eq!(gc.live(), 0);
    }

    #[test]
    fn marks_reset_between_cycles() {
        let mut gc = GarbageCollector::new();
        let a = gc.track(Object::Number(1.0));

        // Survives while rooted, reclaimed the first cycle it is not.
        assert_eq!(gc.collect(&[a]).live, 1);
        assert_eq!(gc.collect(&[a]).live, 1);
        let stats = gc.collect(&[]);
        assert_eq!(stats.reclaimed, 1);
        assert_eq!(stats.live, 0);
    }

    #[test]
    fn duplicate_roots_mark_once() {
        let mut gc = GarbageCollector::new();
        let a = gc.track(Object::Number(1.0));
        let stats = gc.collect(&[a, a, a]);
        assert_eq!(stats.live, 1);
        assert_eq!(gc.get(a), &Object::Number(1.0));
    }

    #[test]
    fn swept_slots_are_reused() {
        let mut gc = GarbageCollector::new();
        let a = gc.track(Object::Number(1.0));
        gc.collect(&[]);

        let b = gc.track(Object::Number(2.0));
        // The freed slot is handed back out, so the handles coincide.
        assert_eq!(a, b);
        assert_eq!(gc.live(), 1);
        assert_eq!(gc.get(b), &Object::Number(2.0));
    }

    #[test]
    fn objects_tracked_after_a_cycle_survive_until_the_next() {
        let mut gc = GarbageCollector::new();
        gc.collect(&[]);
        let a = gc.track(Object::Number(1.0));
        assert_eq!(gc.live(), 1);
        let stats = gc.collect(&[a]);
        assert_eq!(stats.live, 1);
    }

    #[test]
    fn reset_clears_registry() {
        let mut gc = GarbageCollector::new();
        gc.track(Object::Number(1.0));
        gc.collect(&[]);
        gc.reset();
        assert_eq!(gc.live(), 0);
        assert_eq!(gc.cycles(), 0);
    }

    #[test]
    #[should_panic(expected = "dangling object handle")]
    fn dangling_handle_panics() {
        let mut gc = GarbageCollector::new();
        let a = gc.track(Object::Number(1.0));
        gc.collect(&[]);
        gc.get(a);
    }
}
