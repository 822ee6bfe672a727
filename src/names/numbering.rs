//! Ordinal suffixes among same-named persons
//!
//! Bulk passes skip sitting rulers: a ruler's ordinal reflects historical
//! repetition of rule (see `succession`), not present-day kinship count.

use ahash::AHashSet;

use crate::core::config::EngineSettings;
use crate::core::types::PersonId;
use crate::names::cache::DecorationCache;
use crate::names::kinship::blood_relatives;
use crate::names::roman::to_roman;
use crate::world::Population;

/// The leading whitespace-delimited token of a display name
pub fn base_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// Sort ids age-descending, ties broken by id for determinism
fn order_by_age(pop: &Population, ids: &mut Vec<PersonId>) {
    ids.sort_by(|&a, &b| {
        let age_a = pop.person(a).map(|p| p.age).unwrap_or(0.0);
        let age_b = pop.person(b).map(|p| p.age).unwrap_or(0.0);
        age_b
            .partial_cmp(&age_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
}

/// Renumber the whole population, unit by unit, in the configured scope.
/// Current realm rulers are excluded; their suffix belongs to succession.
pub fn renumber_population(settings: &EngineSettings, pop: &Population, cache: &DecorationCache) {
    let rulers = pop.current_rulers();

    let mut unit_ids: Vec<_> = pop.units.keys().copied().collect();
    unit_ids.sort_by_key(|u| u.0);

    for unit_id in unit_ids {
        let members: Vec<PersonId> = pop
            .unit_members(unit_id)
            .into_iter()
            .filter(|m| !rulers.contains(m))
            .collect();

        if settings.family_scope {
            renumber_family_scope(settings, pop, cache, &members);
        } else {
            renumber_unit_scope(pop, cache, &members);
        }
    }
}

/// Family scope: each member is numbered within their own blood-relative
/// subset of the unit roster.
fn renumber_family_scope(
    settings: &EngineSettings,
    pop: &Population,
    cache: &DecorationCache,
    members: &[PersonId],
) {
    let member_set: AHashSet<PersonId> = members.iter().copied().collect();

    for &id in members {
        let Some(person) = pop.person(id) else {
            continue;
        };
        let base = base_name(&person.given_name);

        let mut family: Vec<PersonId> = blood_relatives(
            pop,
            id,
            settings.generations_up,
            settings.generations_down,
            settings.include_extended_family,
        )
        .into_iter()
        .filter(|r| member_set.contains(r))
        .filter(|&r| {
            pop.person(r)
                .is_some_and(|p| base_name(&p.given_name) == base)
        })
        .collect();

        if family.len() < 2 {
            cache.clear_suffix(id);
            continue;
        }

        order_by_age(pop, &mut family);
        if let Some(idx) = family.iter().position(|&f| f == id) {
            cache.set_suffix(id, to_roman(idx as u32 + 1));
        }
    }
}

/// Unit scope: number across the whole roster by base name
fn renumber_unit_scope(pop: &Population, cache: &DecorationCache, members: &[PersonId]) {
    let mut groups: std::collections::BTreeMap<String, Vec<PersonId>> =
        std::collections::BTreeMap::new();
    for &id in members {
        if let Some(person) = pop.person(id) {
            groups
                .entry(base_name(&person.given_name).to_string())
                .or_default()
                .push(id);
        }
    }

    for (_, mut group) in groups {
        if group.len() < 2 {
            for id in group {
                cache.clear_suffix(id);
            }
            continue;
        }
        order_by_age(pop, &mut group);
        for (i, id) in group.iter().enumerate() {
            cache.set_suffix(*id, to_roman(i as u32 + 1));
        }
    }
}

/// Renumber a single person from their unit/family standing, replacing or
/// removing any existing ordinal. Used at birth and when a ruler steps
/// down and rejoins ordinary numbering.
pub fn renumber_person(
    settings: &EngineSettings,
    pop: &Population,
    cache: &DecorationCache,
    id: PersonId,
) {
    let Some(person) = pop.person(id) else {
        return;
    };
    let base = base_name(&person.given_name).to_string();
    let unit = person.unit;

    let pool: Vec<PersonId> = if settings.family_scope {
        blood_relatives(
            pop,
            id,
            settings.generations_up,
            settings.generations_down,
            settings.include_extended_family,
        )
        .into_iter()
        .collect()
    } else {
        match unit {
            Some(u) => pop.unit_members(u),
            None => vec![id],
        }
    };

    let mut same_name: Vec<PersonId> = pool
        .into_iter()
        .filter(|&other| {
            pop.person(other).is_some_and(|p| {
                p.alive && p.unit == unit && base_name(&p.given_name) == base
            })
        })
        .collect();

    if same_name.len() <= 1 {
        cache.clear_suffix(id);
        return;
    }

    order_by_age(pop, &mut same_name);
    // Roster inconsistency: treat a missing person as last in line
    let idx = same_name
        .iter()
        .position(|&p| p == id)
        .unwrap_or(same_name.len() - 1);
    cache.set_suffix(id, to_roman(idx as u32 + 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RealmId, Sex, UnitId};
    use crate::world::test_support::{link_child, make_person};
    use crate::world::{Realm, Unit};

    fn unit_with(members: &[u64]) -> Unit {
        Unit {
            id: UnitId(1),
            name: "Stormwind".to_string(),
            leader: None,
            members: members.iter().map(|&m| PersonId(m)).collect(),
        }
    }

    /// Three Aldrics of one family in one unit, plus an unrelated Bertram
    fn family_population() -> Population {
        let mut pop = Population::new();
        pop.insert_unit(unit_with(&[]));
        pop.insert_person(make_person(1, "Aldric", 60.0, Sex::Male, Some(UnitId(1))));
        pop.insert_person(make_person(2, "Aldric", 35.0, Sex::Male, Some(UnitId(1))));
        pop.insert_person(make_person(3, "Aldric", 10.0, Sex::Male, Some(UnitId(1))));
        pop.insert_person(make_person(4, "Bertram", 40.0, Sex::Male, Some(UnitId(1))));
        link_child(&mut pop.persons, PersonId(2), Some(PersonId(1)), None);
        link_child(&mut pop.persons, PersonId(3), Some(PersonId(2)), None);
        pop
    }

    #[test]
    fn test_base_name_is_first_token() {
        assert_eq!(base_name("Aldric the Bold"), "Aldric");
        assert_eq!(base_name("Aldric"), "Aldric");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_family_scope_orders_by_age() {
        let settings = EngineSettings::default();
        let pop = family_population();
        let cache = DecorationCache::new();

        renumber_population(&settings, &pop, &cache);
        assert_eq!(cache.suffix(PersonId(1)).as_deref(), Some("I"));
        assert_eq!(cache.suffix(PersonId(2)).as_deref(), Some("II"));
        assert_eq!(cache.suffix(PersonId(3)).as_deref(), Some("III"));
        // Lone bearer of his name
        assert_eq!(cache.suffix(PersonId(4)), None);
    }

    #[test]
    fn test_lone_bearer_suffix_removed() {
        let settings = EngineSettings::default();
        let pop = family_population();
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(4), "VII".to_string());

        renumber_population(&settings, &pop, &cache);
        assert_eq!(cache.suffix(PersonId(4)), None);
    }

    #[test]
    fn test_unit_scope_numbers_unrelated_namesakes() {
        let settings = EngineSettings {
            family_scope: false,
            ..EngineSettings::default()
        };
        // Two unrelated Aldrics in the same unit: family scope would not
        // number them, unit scope does.
        let mut pop = Population::new();
        pop.insert_unit(unit_with(&[]));
        pop.insert_person(make_person(1, "Aldric", 60.0, Sex::Male, Some(UnitId(1))));
        pop.insert_person(make_person(2, "Aldric", 35.0, Sex::Male, Some(UnitId(1))));
        let cache = DecorationCache::new();

        renumber_population(&settings, &pop, &cache);
        assert_eq!(cache.suffix(PersonId(1)).as_deref(), Some("I"));
        assert_eq!(cache.suffix(PersonId(2)).as_deref(), Some("II"));
    }

    #[test]
    fn test_family_scope_ignores_unrelated_namesake() {
        let settings = EngineSettings::default();
        let mut pop = family_population();
        // Unrelated fourth Aldric, no kinship link
        pop.insert_person(make_person(5, "Aldric", 80.0, Sex::Male, Some(UnitId(1))));
        let cache = DecorationCache::new();

        renumber_population(&settings, &pop, &cache);
        // The family trio numbers among themselves, unaffected by the
        // older stranger.
        assert_eq!(cache.suffix(PersonId(1)).as_deref(), Some("I"));
        assert_eq!(cache.suffix(PersonId(2)).as_deref(), Some("II"));
        assert_eq!(cache.suffix(PersonId(3)).as_deref(), Some("III"));
    }

    #[test]
    fn test_rulers_skipped_in_bulk_pass() {
        let settings = EngineSettings::default();
        let mut pop = family_population();
        // Make the eldest Aldric a sitting ruler
        pop.units.get_mut(&UnitId(1)).unwrap().leader = Some(PersonId(1));
        pop.insert_realm(Realm {
            id: RealmId(1),
            name: "Vlandia".to_string(),
            leading_unit: Some(UnitId(1)),
            alive: true,
        });
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(1), "IV".to_string());

        renumber_population(&settings, &pop, &cache);
        // Ruler's succession-driven suffix untouched; the rest number
        // among themselves.
        assert_eq!(cache.suffix(PersonId(1)).as_deref(), Some("IV"));
        assert_eq!(cache.suffix(PersonId(2)).as_deref(), Some("I"));
        assert_eq!(cache.suffix(PersonId(3)).as_deref(), Some("II"));
    }

    #[test]
    fn test_renumber_person_after_step_down() {
        let settings = EngineSettings::default();
        let pop = family_population();
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(2), "IX".to_string());

        renumber_person(&settings, &pop, &cache, PersonId(2));
        assert_eq!(cache.suffix(PersonId(2)).as_deref(), Some("II"));
    }

    #[test]
    fn test_renumber_person_sole_bearer_clears() {
        let settings = EngineSettings::default();
        let pop = family_population();
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(4), "III".to_string());

        renumber_person(&settings, &pop, &cache, PersonId(4));
        assert_eq!(cache.suffix(PersonId(4)), None);
    }

    #[test]
    fn test_age_tie_broken_by_id() {
        let settings = EngineSettings {
            family_scope: false,
            ..EngineSettings::default()
        };
        let mut pop = Population::new();
        pop.insert_unit(unit_with(&[]));
        pop.insert_person(make_person(2, "Aldric", 30.0, Sex::Male, Some(UnitId(1))));
        pop.insert_person(make_person(1, "Aldric", 30.0, Sex::Male, Some(UnitId(1))));
        let cache = DecorationCache::new();

        renumber_population(&settings, &pop, &cache);
        assert_eq!(cache.suffix(PersonId(1)).as_deref(), Some("I"));
        assert_eq!(cache.suffix(PersonId(2)).as_deref(), Some("II"));
    }
}
