//! Honorific nickname selection for rulers
//!
//! Best threshold wins within each trait category, then across
//! categories; ties at the global best are broken uniformly at random.

use ahash::AHashMap;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::NicknameRule;
use crate::core::types::TraitCategory;
use crate::world::Person;

/// Pick a nickname suffix for a person, or `None` when no rule is
/// satisfied. Rules naming an unknown trait category are skipped.
pub fn select_nickname(
    rules: &[NicknameRule],
    person: &Person,
    rng: &mut ChaCha8Rng,
) -> Option<String> {
    let mut by_category: AHashMap<TraitCategory, Vec<&NicknameRule>> = AHashMap::new();
    for rule in rules {
        let Some(category) = TraitCategory::from_name(&rule.trait_name) else {
            tracing::debug!(trait_name = %rule.trait_name, "skipping nickname rule with unknown trait");
            continue;
        };
        by_category.entry(category).or_default().push(rule);
    }

    let mut matches: Vec<(i32, &str)> = Vec::new();
    for (category, group) in &by_category {
        let level = person.trait_level(*category);
        let satisfied: Vec<&&NicknameRule> =
            group.iter().filter(|r| level >= r.threshold).collect();
        let Some(best) = satisfied.iter().map(|r| r.threshold).max() else {
            continue;
        };
        for rule in satisfied.iter().filter(|r| r.threshold == best) {
            matches.push((rule.threshold, rule.suffix.as_str()));
        }
    }

    let global_best = matches.iter().map(|(t, _)| *t).max()?;
    let mut top: Vec<&str> = matches
        .into_iter()
        .filter(|(t, _)| *t == global_best)
        .map(|(_, s)| s)
        .collect();
    top.sort_unstable();
    top.dedup();

    let chosen = top[rng.gen_range(0..top.len())];
    Some(chosen.to_string())
}
