//! Per-realm succession history
//!
//! An append-only list of resolved ruler names per governing unit. A
//! ruler's ordinal is the count of earlier reigns under the same base
//! name, so the history drives both the recorded entry and the suffix
//! written into the decoration cache.

use ahash::AHashMap;

use crate::core::types::{PersonId, RealmId};
use crate::names::cache::DecorationCache;
use crate::names::numbering::base_name;
use crate::names::roman::to_roman;

#[derive(Debug, Clone, Default)]
pub struct SuccessionTracker {
    histories: AHashMap<RealmId, Vec<String>>,
}

impl SuccessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// First observation of a realm with a sitting ruler: record the
    /// ruler's bare base name as the sole entry. No-op when a history
    /// already exists.
    pub fn initialize_realm(&mut self, realm: RealmId, ruler_name: &str) {
        let history = self.histories.entry(realm).or_default();
        if history.is_empty() {
            history.push(base_name(ruler_name).to_string());
        }
    }

    /// Record a ruler change. Past entries with the same base-name token
    /// (ordinal suffixes ignored) determine the new ruler's ordinal; the
    /// suffix is mirrored into the decoration cache. Returns the entry
    /// appended to the history.
    pub fn record_ruler_change(
        &mut self,
        realm: RealmId,
        ruler: PersonId,
        ruler_name: &str,
        cache: &DecorationCache,
    ) -> String {
        let base = base_name(ruler_name).to_string();
        let history = self.histories.entry(realm).or_default();

        let prior_count = history
            .iter()
            .filter(|entry| base_name(entry) == base)
            .count();

        let full_name = if prior_count == 0 {
            // First reign under this name: no suffix, and any stale
            // ordinal from ordinary numbering is dropped.
            cache.clear_suffix(ruler);
            base
        } else {
            let roman = to_roman(prior_count as u32 + 1);
            cache.set_suffix(ruler, roman.clone());
            format!("{} {}", base, roman)
        };

        history.push(full_name.clone());
        full_name
    }

    /// The ordinal recorded in the last history entry, when it has one.
    /// Used after load to re-decorate the sitting ruler.
    pub fn last_recorded_suffix(&self, realm: RealmId) -> Option<&str> {
        let entry = self.histories.get(&realm)?.last()?;
        let mut tokens = entry.split_whitespace();
        let _base = tokens.next()?;
        tokens.last()
    }

    pub fn history(&self, realm: RealmId) -> Option<&[String]> {
        self.histories.get(&realm).map(|h| h.as_slice())
    }

    /// Realm dissolution discards its history entirely
    pub fn remove_realm(&mut self, realm: RealmId) -> bool {
        self.histories.remove(&realm).is_some()
    }

    pub fn clear(&mut self) {
        self.histories.clear();
    }

    pub fn realms(&self) -> impl Iterator<Item = (&RealmId, &Vec<String>)> {
        self.histories.iter()
    }

    pub fn restore(&mut self, realm: RealmId, entries: Vec<String>) {
        self.histories.insert(realm, entries);
    }
}
