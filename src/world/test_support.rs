//! Shared builders for unit tests

use std::collections::HashMap;

use crate::core::types::{PersonId, Sex, UnitId};
use crate::world::person::Person;

pub fn make_person(id: u64, name: &str, age: f32, sex: Sex, unit: Option<UnitId>) -> Person {
    Person {
        id: PersonId(id),
        given_name: name.to_string(),
        age,
        sex,
        alive: true,
        father: None,
        mother: None,
        children: vec![],
        spouse: None,
        former_spouses: vec![],
        unit,
        culture: "vlandia".to_string(),
        traits: HashMap::new(),
        is_wanderer: false,
        is_notable: false,
        is_minor_faction: false,
    }
}

/// Link a child to both parents, updating the parents' child lists
pub fn link_child(
    persons: &mut HashMap<PersonId, Person>,
    child: PersonId,
    father: Option<PersonId>,
    mother: Option<PersonId>,
) {
    if let Some(p) = persons.get_mut(&child) {
        p.father = father;
        p.mother = mother;
    }
    for parent in [father, mother].into_iter().flatten() {
        if let Some(p) = persons.get_mut(&parent) {
            if !p.children.contains(&child) {
                p.children.push(child);
            }
        }
    }
}
