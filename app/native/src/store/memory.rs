//! In-memory placement store.

use dashmap::DashMap;

use super::{OwnerId, PlacementStore, StoreResult};
use crate::grid::PlacementSet;

/// Keeps placement sets in a concurrent map. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: DashMap<OwnerId, PlacementSet>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of owners with stored data.
    #[must_use]
    pub fn owner_count(&self) -> usize { self.sets.len() }
}

impl PlacementStore for MemoryStore {
    fn load(&self, owner: &OwnerId) -> StoreResult<PlacementSet> {
        Ok(self.sets.get(owner).map(|set| set.clone()).unwrap_or_default())
    }

    fn save(&self, owner: &OwnerId, set: &PlacementSet) -> StoreResult<()> {
        self.sets.insert(owner.clone(), set.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridRect, Placement};

    #[test]
    fn test_unknown_owner_loads_empty() {
        let store = MemoryStore::new();
        let owner = OwnerId::new("nobody").unwrap();
        assert!(store.load(&owner).unwrap().is_empty());
        assert_eq!(store.owner_count(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let owner = OwnerId::new("alice").unwrap();
        let set =
            PlacementSet::from_placements(vec![Placement::new("a", GridRect::new(0, 0, 1, 1))]);

        store.save(&owner, &set).unwrap();
        assert_eq!(store.load(&owner).unwrap(), set);
        assert!(store.load(&OwnerId::new("bob").unwrap()).unwrap().is_empty());
    }
}
