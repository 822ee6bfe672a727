//! Host-owned person, unit and realm records
//!
//! The engine never copies person state; it looks records up by id in the
//! host's `Population` and holds nothing but ids itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{PersonId, RealmId, Sex, TraitCategory, UnitId};

/// A person in the kinship graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    /// Base display name; the leading whitespace-delimited token is the
    /// "base given name" used for numbering and succession grouping.
    pub given_name: String,
    pub age: f32,
    pub sex: Sex,
    pub alive: bool,

    // Kinship references. Dangling ids are tolerated everywhere.
    pub father: Option<PersonId>,
    pub mother: Option<PersonId>,
    pub children: Vec<PersonId>,
    pub spouse: Option<PersonId>,
    pub former_spouses: Vec<PersonId>,

    pub unit: Option<UnitId>,
    pub culture: String,

    /// Integer level per trait category; absent means level 0
    pub traits: HashMap<TraitCategory, i32>,

    // Role flags consulted by surname eligibility
    pub is_wanderer: bool,
    pub is_notable: bool,
    pub is_minor_faction: bool,
}

impl Person {
    pub fn trait_level(&self, category: TraitCategory) -> i32 {
        self.traits.get(&category).copied().unwrap_or(0)
    }
}

/// An organizational unit (lineage/clan); its display name doubles as the
/// surname candidate in unit-name mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub leader: Option<PersonId>,
    pub members: Vec<PersonId>,
}

/// A governing unit (realm) led by one organizational unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Realm {
    pub id: RealmId,
    pub name: String,
    pub leading_unit: Option<UnitId>,
    pub alive: bool,
}
