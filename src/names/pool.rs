//! Culture-keyed candidate name pools
//!
//! Rebuilt at game start/load from host data, read-only afterwards. The
//! synthetic "All" pool is the deduplicated union across cultures and is
//! the fallback when a culture has no pool of its own.

use ahash::AHashMap;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::world::Population;

pub const ALL_CULTURES: &str = "All";

#[derive(Debug, Clone, Default)]
pub struct NamePool {
    pools: AHashMap<String, Vec<String>>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from explicit culture -> candidate lists
    pub fn rebuild<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        self.pools.clear();
        for (culture, names) in entries {
            let culture = culture.into();
            if names.is_empty() {
                continue;
            }
            let pool = self.pools.entry(culture).or_default();
            for name in names {
                if !pool.contains(&name) {
                    pool.push(name);
                }
            }
        }

        let mut all: Vec<String> = Vec::new();
        for names in self.pools.values() {
            for name in names {
                if !all.contains(name) {
                    all.push(name.clone());
                }
            }
        }
        if !all.is_empty() {
            self.pools.insert(ALL_CULTURES.to_string(), all);
        }
    }

    /// Rebuild from the living population's given names, grouped by
    /// culture tag
    pub fn rebuild_from_population(&mut self, pop: &Population) {
        let mut by_culture: AHashMap<String, Vec<String>> = AHashMap::new();
        for id in pop.alive_person_ids() {
            if let Some(person) = pop.person(id) {
                by_culture
                    .entry(person.culture.clone())
                    .or_default()
                    .push(person.given_name.clone());
            }
        }
        self.rebuild(by_culture);
        tracing::debug!(cultures = self.pools.len(), "rebuilt name pools");
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn candidates(&self, culture: &str) -> Option<&[String]> {
        self.pools.get(culture).map(|v| v.as_slice())
    }

    /// Draw a uniform random candidate for a culture, falling back to the
    /// "All" pool. Returns `None` when both pools are empty or absent.
    pub fn draw(&self, culture: &str, rng: &mut ChaCha8Rng) -> Option<String> {
        let pool = self
            .pools
            .get(culture)
            .filter(|p| !p.is_empty())
            .or_else(|| self.pools.get(ALL_CULTURES).filter(|p| !p.is_empty()))?;
        let idx = rng.gen_range(0..pool.len());
        Some(pool[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool_with(entries: Vec<(&str, Vec<&str>)>) -> NamePool {
        let mut pool = NamePool::new();
        pool.rebuild(
            entries
                .into_iter()
                .map(|(c, ns)| (c, ns.into_iter().map(String::from).collect())),
        );
        pool
    }

    #[test]
    fn test_all_pool_is_deduplicated_union() {
        let pool = pool_with(vec![
            ("vlandia", vec!["Aldric", "Edric"]),
            ("sturgia", vec!["Olek", "Aldric"]),
        ]);
        let all = pool.candidates(ALL_CULTURES).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_draw_prefers_own_culture() {
        let pool = pool_with(vec![("vlandia", vec!["Aldric"]), ("sturgia", vec!["Olek"])]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(pool.draw("vlandia", &mut rng).as_deref(), Some("Aldric"));
        }
    }

    #[test]
    fn test_draw_falls_back_to_all() {
        let pool = pool_with(vec![("vlandia", vec!["Aldric"])]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(pool.draw("khuzait", &mut rng).as_deref(), Some("Aldric"));
    }

    #[test]
    fn test_draw_from_empty_pool_is_none() {
        let pool = NamePool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(pool.draw("vlandia", &mut rng), None);
    }

    #[test]
    fn test_empty_culture_lists_are_dropped() {
        let pool = pool_with(vec![("vlandia", vec![])]);
        assert!(pool.candidates("vlandia").is_none());
        assert!(pool.candidates(ALL_CULTURES).is_none());
    }
}
