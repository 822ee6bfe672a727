//! Surname assignment: unit-name mode and free (inheritance) mode

use rand_chacha::ChaCha8Rng;

use crate::core::config::{EngineSettings, SurnameMode};
use crate::core::types::{PersonId, Sex};
use crate::names::cache::DecorationCache;
use crate::names::kinship::blood_relatives;
use crate::names::pool::NamePool;
use crate::world::Population;

/// A person receives surname decoration only when alive and every
/// role toggle that applies to them is enabled.
pub fn eligible_for_surname(settings: &EngineSettings, pop: &Population, id: PersonId) -> bool {
    let Some(person) = pop.person(id) else {
        return false;
    };
    if !person.alive {
        return false;
    }
    if !settings.surnames_for_wanderers && person.is_wanderer {
        return false;
    }
    if !settings.surnames_for_notables && person.is_notable {
        return false;
    }
    if !settings.surnames_for_rulers && pop.is_ruler(id) {
        return false;
    }
    if !settings.surnames_for_minor_factions && person.is_minor_faction {
        return false;
    }
    true
}

/// Unit-name mode: surname is the unit's display name, overwriting any
/// previous entry. Recomputed whenever applied, never memoized.
pub fn apply_unit_surname(pop: &Population, cache: &DecorationCache, id: PersonId) {
    let Some(unit_name) = pop
        .person(id)
        .and_then(|p| p.unit)
        .and_then(|u| pop.unit(u))
        .map(|u| u.name.clone())
    else {
        return;
    };
    cache.set_unit_surname(id, unit_name);
}

/// Resolve one person's surname according to the configured mode
pub fn resolve_surname(
    settings: &EngineSettings,
    pop: &Population,
    cache: &DecorationCache,
    pool: &NamePool,
    rng: &mut ChaCha8Rng,
    id: PersonId,
) {
    if !settings.surnames_enabled || !eligible_for_surname(settings, pop, id) {
        return;
    }
    match settings.surname_mode {
        SurnameMode::UnitName => apply_unit_surname(pop, cache, id),
        SurnameMode::Free => resolve_free_surname(settings, pop, cache, pool, rng, id),
    }
}

/// Free mode: sticky once assigned. Inheritance order is spouse (for
/// wives), then blood relatives, then a random culture-pool draw.
fn resolve_free_surname(
    settings: &EngineSettings,
    pop: &Population,
    cache: &DecorationCache,
    pool: &NamePool,
    rng: &mut ChaCha8Rng,
    id: PersonId,
) {
    if cache.has_free_surname(id) {
        return;
    }
    let Some(person) = pop.person(id) else {
        return;
    };

    // 1) Wife inherits from her (living) spouse, or failing that the
    //    first former spouse with a recorded surname.
    if person.sex == Sex::Female && settings.wife_inherits_surname {
        let living_spouse_surname = person
            .spouse
            .filter(|&sp| pop.person(sp).is_some_and(|p| p.alive))
            .and_then(|sp| cache.free_surname(sp));
        if let Some(surname) = living_spouse_surname {
            cache.set_free_surname(id, surname);
            return;
        }
        for &ex in &person.former_spouses {
            if let Some(surname) = cache.free_surname(ex) {
                cache.set_free_surname(id, surname);
                return;
            }
        }
    }

    // 2) Blood relatives at the surname depths, eligible only
    let mut relatives: Vec<PersonId> = blood_relatives(
        pop,
        id,
        settings.surname_generations_up,
        settings.surname_generations_down,
        settings.include_extended_family,
    )
    .into_iter()
    .filter(|&r| eligible_for_surname(settings, pop, r))
    .collect();
    relatives.sort();

    if relatives.len() >= 2 {
        let parent_in_set = person
            .father
            .filter(|f| relatives.contains(f))
            .or_else(|| person.mother.filter(|m| relatives.contains(m)));

        let elder = oldest_male(pop, &relatives).or_else(|| relatives.first().copied());

        if let Some(surname) = parent_in_set.and_then(|p| cache.free_surname(p)) {
            cache.set_free_surname(id, surname);
            return;
        }
        let Some(elder) = elder else { return };
        if let Some(surname) = cache.free_surname(elder) {
            cache.set_free_surname(id, surname);
            return;
        }
        // Nobody in the family has a surname yet: draw one and back-fill
        // the elder so later relatives converge on it.
        let culture = pop.person(elder).map(|p| p.culture.clone()).unwrap_or_default();
        if let Some(pick) = pool.draw(&culture, rng) {
            cache.set_free_surname(elder, pick.clone());
            cache.set_free_surname(id, pick);
        }
    } else {
        // Isolated person: a pool draw for them alone
        if let Some(pick) = pool.draw(&person.culture, rng) {
            cache.set_free_surname(id, pick);
        }
    }
}

/// Oldest non-female member of the set; ties broken by id
fn oldest_male(pop: &Population, ids: &[PersonId]) -> Option<PersonId> {
    let mut males: Vec<&crate::world::Person> = ids
        .iter()
        .filter_map(|&id| pop.person(id))
        .filter(|p| p.sex != Sex::Female)
        .collect();
    males.sort_by(|a, b| {
        b.age
            .partial_cmp(&a.age)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });
    males.first().map(|p| p.id)
}

/// Bulk pass over the population, males first so wives can find their
/// husband's fresh entry on the same pass
pub fn apply_surnames_to_population(
    settings: &EngineSettings,
    pop: &Population,
    cache: &DecorationCache,
    pool: &NamePool,
    rng: &mut ChaCha8Rng,
) {
    if !settings.surnames_enabled {
        return;
    }
    let mut ids: Vec<PersonId> = pop
        .alive_person_ids()
        .into_iter()
        .filter(|&id| eligible_for_surname(settings, pop, id))
        .collect();
    ids.sort_by_key(|&id| {
        let female = pop.person(id).map(|p| p.sex == Sex::Female).unwrap_or(false);
        (female, id)
    });

    for id in ids {
        match settings.surname_mode {
            SurnameMode::UnitName => apply_unit_surname(pop, cache, id),
            SurnameMode::Free => resolve_free_surname(settings, pop, cache, pool, rng, id),
        }
    }
}

/// Marriage trigger: in free mode with wife inheritance, the non-female
/// party's existing surname is copied to the other party.
pub fn propagate_marriage_surname(
    settings: &EngineSettings,
    pop: &Population,
    cache: &DecorationCache,
    a: PersonId,
    b: PersonId,
) {
    if !settings.surnames_enabled
        || settings.surname_mode != SurnameMode::Free
        || !settings.wife_inherits_surname
    {
        return;
    }
    if !eligible_for_surname(settings, pop, a) || !eligible_for_surname(settings, pop, b) {
        return;
    }

    let is_male = |id: PersonId| pop.person(id).is_some_and(|p| p.sex != Sex::Female);
    if is_male(a) {
        if let Some(surname) = cache.free_surname(a) {
            cache.set_free_surname(b, surname);
            return;
        }
    }
    if is_male(b) {
        if let Some(surname) = cache.free_surname(b) {
            cache.set_free_surname(a, surname);
        }
    }
}
