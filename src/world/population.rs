//! Population - the host-owned container the engine resolves ids against

use ahash::AHashSet;
use std::collections::HashMap;

use crate::core::types::{PersonId, RealmId, UnitId};
use crate::world::person::{Person, Realm, Unit};

/// All persons, units and realms currently known to the host.
///
/// Every lookup tolerates dangling ids by returning `None`; the engine
/// treats a missing record as "no decoration applies", never as an error.
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub persons: HashMap<PersonId, Person>,
    pub units: HashMap<UnitId, Unit>,
    pub realms: HashMap<RealmId, Realm>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.get_mut(&id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn realm(&self, id: RealmId) -> Option<&Realm> {
        self.realms.get(&id)
    }

    pub fn insert_person(&mut self, person: Person) {
        if let Some(unit_id) = person.unit {
            if let Some(unit) = self.units.get_mut(&unit_id) {
                if !unit.members.contains(&person.id) {
                    unit.members.push(person.id);
                }
            }
        }
        self.persons.insert(person.id, person);
    }

    pub fn insert_unit(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    pub fn insert_realm(&mut self, realm: Realm) {
        self.realms.insert(realm.id, realm);
    }

    /// The current leader of a realm: its leading unit's leader
    pub fn realm_leader(&self, id: RealmId) -> Option<PersonId> {
        let realm = self.realm(id)?;
        if !realm.alive {
            return None;
        }
        let unit = self.unit(realm.leading_unit?)?;
        unit.leader
    }

    /// Leaders of every living realm
    pub fn current_rulers(&self) -> AHashSet<PersonId> {
        self.realms
            .keys()
            .filter_map(|&id| self.realm_leader(id))
            .collect()
    }

    pub fn is_ruler(&self, id: PersonId) -> bool {
        self.realms.keys().any(|&r| self.realm_leader(r) == Some(id))
    }

    /// Living members of a unit, dangling ids skipped
    pub fn unit_members(&self, id: UnitId) -> Vec<PersonId> {
        self.unit(id)
            .map(|unit| {
                unit.members
                    .iter()
                    .copied()
                    .filter(|m| self.person(*m).is_some_and(|p| p.alive))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of all living persons
    pub fn alive_person_ids(&self) -> Vec<PersonId> {
        let mut ids: Vec<PersonId> = self
            .persons
            .values()
            .filter(|p| p.alive)
            .map(|p| p.id)
            .collect();
        ids.sort();
        ids
    }
}
