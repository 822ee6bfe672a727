//! The shared decoration cache read by the render path
//!
//! One concurrent map per decoration kind rather than one map of composite
//! records: every field update is an independent atomic upsert, so a
//! concurrent reader sees the pre- or post-update value for a key, never a
//! torn record. All mutation happens on the single logic flow; reads may
//! come from anywhere at any time.

use dashmap::DashMap;

use crate::core::types::PersonId;
use crate::world::Population;

#[derive(Debug, Default)]
pub struct DecorationCache {
    /// Roman ordinal suffixes ("II", "III", ...)
    suffixes: DashMap<PersonId, String>,
    /// Unit-name mode surnames, recomputed on every pass
    unit_surnames: DashMap<PersonId, String>,
    /// Free-mode surnames, sticky once assigned
    free_surnames: DashMap<PersonId, String>,
    /// Honorific nicknames ("the Great")
    nicknames: DashMap<PersonId, String>,
    /// Owner record paired with each nickname entry
    nickname_owners: DashMap<PersonId, PersonId>,
}

impl DecorationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suffix(&self, id: PersonId) -> Option<String> {
        self.suffixes.get(&id).map(|v| v.clone())
    }

    pub fn set_suffix(&self, id: PersonId, suffix: String) {
        self.suffixes.insert(id, suffix);
    }

    pub fn clear_suffix(&self, id: PersonId) {
        self.suffixes.remove(&id);
    }

    pub fn unit_surname(&self, id: PersonId) -> Option<String> {
        self.unit_surnames.get(&id).map(|v| v.clone())
    }

    pub fn set_unit_surname(&self, id: PersonId, surname: String) {
        self.unit_surnames.insert(id, surname);
    }

    pub fn clear_unit_surname(&self, id: PersonId) {
        self.unit_surnames.remove(&id);
    }

    pub fn free_surname(&self, id: PersonId) -> Option<String> {
        self.free_surnames.get(&id).map(|v| v.clone())
    }

    pub fn has_free_surname(&self, id: PersonId) -> bool {
        self.free_surnames.contains_key(&id)
    }

    pub fn set_free_surname(&self, id: PersonId, surname: String) {
        self.free_surnames.insert(id, surname);
    }

    pub fn clear_free_surname(&self, id: PersonId) {
        self.free_surnames.remove(&id);
    }

    pub fn nickname(&self, id: PersonId) -> Option<String> {
        self.nicknames.get(&id).map(|v| v.clone())
    }

    pub fn nickname_owner(&self, id: PersonId) -> Option<PersonId> {
        self.nickname_owners.get(&id).map(|v| *v)
    }

    /// Store a nickname together with its owner record. The two maps stay
    /// symmetric: a nickname entry always has a matching owner entry.
    pub fn set_nickname(&self, id: PersonId, nickname: String, owner: PersonId) {
        self.nicknames.insert(id, nickname);
        self.nickname_owners.insert(id, owner);
    }

    pub fn clear_nickname(&self, id: PersonId) {
        self.nicknames.remove(&id);
        self.nickname_owners.remove(&id);
    }

    /// Remove every decoration for one person
    pub fn clear_person(&self, id: PersonId) {
        self.suffixes.remove(&id);
        self.unit_surnames.remove(&id);
        self.free_surnames.remove(&id);
        self.clear_nickname(id);
    }

    /// Drop derived entries but keep free-mode surnames, which are save
    /// state restored before the game-loaded pass re-derives the rest
    pub fn reset_derived(&self) {
        self.suffixes.clear();
        self.unit_surnames.clear();
        self.nicknames.clear();
        self.nickname_owners.clear();
    }

    /// Drop all entries (new game)
    pub fn reset(&self) {
        self.suffixes.clear();
        self.unit_surnames.clear();
        self.free_surnames.clear();
        self.nicknames.clear();
        self.nickname_owners.clear();
    }

    /// All free-mode surname entries, sorted by person id for
    /// deterministic serialization
    pub fn free_surname_entries(&self) -> Vec<(PersonId, String)> {
        let mut entries: Vec<(PersonId, String)> = self
            .free_surnames
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Remove entries whose person is dead or unknown. Runs on the daily
    /// maintenance trigger, serialized with the other mutating handlers;
    /// concurrent render reads stay safe throughout.
    pub fn sweep_dead(&self, pop: &Population) -> usize {
        let dead = |id: &PersonId| !pop.person(*id).is_some_and(|p| p.alive);
        let before = self.suffixes.len()
            + self.unit_surnames.len()
            + self.free_surnames.len()
            + self.nicknames.len()
            + self.nickname_owners.len();

        self.suffixes.retain(|id, _| !dead(id));
        self.unit_surnames.retain(|id, _| !dead(id));
        self.free_surnames.retain(|id, _| !dead(id));
        self.nicknames.retain(|id, _| !dead(id));
        self.nickname_owners.retain(|id, _| !dead(id));

        let after = self.suffixes.len()
            + self.unit_surnames.len()
            + self.free_surnames.len()
            + self.nicknames.len()
            + self.nickname_owners.len();
        before - after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Sex;
    use crate::world::test_support::make_person;

    #[test]
    fn test_field_updates_are_independent() {
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(1), "II".to_string());
        cache.set_free_surname(PersonId(1), "Stormwind".to_string());

        cache.clear_suffix(PersonId(1));
        assert_eq!(cache.suffix(PersonId(1)), None);
        assert_eq!(cache.free_surname(PersonId(1)).as_deref(), Some("Stormwind"));
    }

    #[test]
    fn test_nickname_owner_symmetry() {
        let cache = DecorationCache::new();
        cache.set_nickname(PersonId(1), "the Great".to_string(), PersonId(1));
        assert_eq!(cache.nickname_owner(PersonId(1)), Some(PersonId(1)));

        cache.clear_nickname(PersonId(1));
        assert_eq!(cache.nickname(PersonId(1)), None);
        assert_eq!(cache.nickname_owner(PersonId(1)), None);
    }

    #[test]
    fn test_sweep_removes_dead_keeps_living() {
        let mut pop = Population::new();
        pop.insert_person(make_person(1, "Aldric", 40.0, Sex::Male, None));
        let mut dead = make_person(2, "Osric", 70.0, Sex::Male, None);
        dead.alive = false;
        pop.insert_person(dead);

        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(1), "I".to_string());
        cache.set_suffix(PersonId(2), "II".to_string());
        cache.set_free_surname(PersonId(2), "Stormwind".to_string());
        cache.set_nickname(PersonId(2), "the Great".to_string(), PersonId(2));

        let removed = cache.sweep_dead(&pop);
        assert_eq!(removed, 4);
        assert_eq!(cache.suffix(PersonId(1)).as_deref(), Some("I"));
        assert_eq!(cache.suffix(PersonId(2)), None);
        assert_eq!(cache.free_surname(PersonId(2)), None);
        assert_eq!(cache.nickname(PersonId(2)), None);
        assert_eq!(cache.nickname_owner(PersonId(2)), None);
    }

    #[test]
    fn test_sweep_removes_unknown_ids() {
        let pop = Population::new();
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(9), "IV".to_string());
        assert_eq!(cache.sweep_dead(&pop), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(1), "I".to_string());
        cache.set_unit_surname(PersonId(1), "dey Molarn".to_string());
        cache.set_nickname(PersonId(1), "the Brave".to_string(), PersonId(1));
        cache.reset();
        assert_eq!(cache.suffix(PersonId(1)), None);
        assert_eq!(cache.unit_surname(PersonId(1)), None);
        assert_eq!(cache.nickname(PersonId(1)), None);
    }

    #[test]
    fn test_concurrent_reads_during_writes() {
        use std::sync::Arc;
        let cache = Arc::new(DecorationCache::new());
        let reader = Arc::clone(&cache);

        let handle = std::thread::spawn(move || {
            for _ in 0..10_000 {
                // Must never block or crash; value is pre- or post-update.
                let _ = reader.suffix(PersonId(1));
            }
        });
        for i in 0..10_000u32 {
            cache.set_suffix(PersonId(1), crate::names::roman::to_roman(i % 30 + 1));
        }
        handle.join().unwrap();
    }
}
