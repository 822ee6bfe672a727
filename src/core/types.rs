//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Stable identifier for a person.
///
/// This is the map key for every decoration; it never changes over a
/// person's lifetime, even when the displayed name does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub u64);

/// Unique identifier for organizational units (lineages/clans)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Unique identifier for governing units (realms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RealmId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Trait categories a nickname rule may reference.
///
/// Rule files name categories by string; unknown names fail closed
/// (the rule is skipped) rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCategory {
    Honor,
    Valor,
    Mercy,
    Generosity,
    Calculating,
}

impl TraitCategory {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Honor" => Some(TraitCategory::Honor),
            "Valor" => Some(TraitCategory::Valor),
            "Mercy" => Some(TraitCategory::Mercy),
            "Generosity" => Some(TraitCategory::Generosity),
            "Calculating" => Some(TraitCategory::Calculating),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TraitCategory::Honor => "Honor",
            TraitCategory::Valor => "Valor",
            TraitCategory::Mercy => "Mercy",
            TraitCategory::Generosity => "Generosity",
            TraitCategory::Calculating => "Calculating",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_equality() {
        let a = PersonId(1);
        let b = PersonId(1);
        let c = PersonId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_person_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<PersonId, &str> = HashMap::new();
        map.insert(PersonId(1), "Aldric");
        assert_eq!(map.get(&PersonId(1)), Some(&"Aldric"));
    }

    #[test]
    fn test_trait_category_from_name() {
        assert_eq!(TraitCategory::from_name("Honor"), Some(TraitCategory::Honor));
        assert_eq!(TraitCategory::from_name("Valor"), Some(TraitCategory::Valor));
        assert_eq!(TraitCategory::from_name("Bloodlust"), None);
        assert_eq!(TraitCategory::from_name("honor"), None);
    }

    #[test]
    fn test_trait_category_name_roundtrip() {
        for cat in [
            TraitCategory::Honor,
            TraitCategory::Valor,
            TraitCategory::Mercy,
            TraitCategory::Generosity,
            TraitCategory::Calculating,
        ] {
            assert_eq!(TraitCategory::from_name(cat.name()), Some(cat));
        }
    }
}
