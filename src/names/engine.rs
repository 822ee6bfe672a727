//! NameEngine - lifecycle orchestration over the resolution rules
//!
//! Owns the decoration cache, succession tracker, name pools and rng, and
//! maps host lifecycle triggers onto the rule components in the right
//! order. All mutation funnels through `handle_event` on a single logic
//! flow; the cache stays safe for concurrent render reads throughout.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::EngineSettings;
use crate::core::error::Result;
use crate::core::types::{PersonId, RealmId};
use crate::names::cache::DecorationCache;
use crate::names::events::LifecycleEvent;
use crate::names::nickname::select_nickname;
use crate::names::numbering::{renumber_person, renumber_population};
use crate::names::persist::{SaveData, SuccessionRecord, SurnameRecord};
use crate::names::pool::NamePool;
use crate::names::render::decorated_name;
use crate::names::succession::SuccessionTracker;
use crate::names::surname::{
    apply_surnames_to_population, propagate_marriage_surname, resolve_surname,
};
use crate::world::Population;

pub struct NameEngine {
    settings: EngineSettings,
    cache: DecorationCache,
    pool: NamePool,
    tracker: SuccessionTracker,
    /// Last seen ruler per realm, for step-down cleanup
    current_rulers: AHashMap<RealmId, PersonId>,
    rng: ChaCha8Rng,
}

impl NameEngine {
    pub fn new(settings: EngineSettings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            cache: DecorationCache::new(),
            pool: NamePool::new(),
            tracker: SuccessionTracker::new(),
            current_rulers: AHashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The shared cache the render path reads. Handing out a reference is
    /// safe: every map inside supports concurrent reads.
    pub fn cache(&self) -> &DecorationCache {
        &self.cache
    }

    pub fn tracker(&self) -> &SuccessionTracker {
        &self.tracker
    }

    /// The render-hook entry point
    pub fn decorated_name(&self, id: PersonId, base: &str) -> String {
        decorated_name(&self.cache, &self.settings, id, base)
    }

    /// Dispatch one lifecycle trigger. Handlers are infallible by design:
    /// every failure path degrades to "no decoration assigned".
    pub fn handle_event(&mut self, pop: &Population, event: LifecycleEvent) {
        match event {
            LifecycleEvent::GameLoaded => self.on_game_loaded(pop),
            LifecycleEvent::NewGameStarted => self.on_new_game(pop),
            LifecycleEvent::PersonBorn { person, natural } => {
                if natural {
                    self.on_person_born(pop, person);
                }
            }
            LifecycleEvent::PersonsMarried { a, b } => {
                propagate_marriage_surname(&self.settings, pop, &self.cache, a, b);
            }
            LifecycleEvent::RulerChanged {
                realm,
                new_leading_unit,
            } => {
                let new_ruler = pop.unit(new_leading_unit).and_then(|u| u.leader);
                self.on_ruler_changed(pop, realm, new_ruler);
            }
            LifecycleEvent::RealmCreated { realm } => self.on_realm_created(pop, realm),
            LifecycleEvent::RealmDestroyed { realm } => self.on_realm_destroyed(pop, realm),
            LifecycleEvent::DailyTick => {
                let removed = self.cache.sweep_dead(pop);
                if removed > 0 {
                    tracing::debug!(removed, "daily sweep evicted dead decoration entries");
                }
            }
        }
    }

    fn on_new_game(&mut self, pop: &Population) {
        self.pool.rebuild_from_population(pop);
        self.cache.reset();
        self.tracker.clear();
        self.snapshot_rulers(pop);

        apply_surnames_to_population(
            &self.settings,
            pop,
            &self.cache,
            &self.pool,
            &mut self.rng,
        );
        self.initialize_histories(pop);
        renumber_population(&self.settings, pop, &self.cache);
        tracing::info!(persons = pop.persons.len(), "new-game name resolution complete");
    }

    fn on_game_loaded(&mut self, pop: &Population) {
        self.pool.rebuild_from_population(pop);
        // Free surnames were restored from save data; everything else is
        // re-derived below.
        self.cache.reset_derived();
        self.snapshot_rulers(pop);

        apply_surnames_to_population(
            &self.settings,
            pop,
            &self.cache,
            &self.pool,
            &mut self.rng,
        );
        self.initialize_histories(pop);

        // Sitting rulers wear the ordinal their last history entry
        // recorded, not a kinship-derived one.
        for (&realm, &ruler) in &self.current_rulers {
            if let Some(suffix) = self.tracker.last_recorded_suffix(realm) {
                self.cache.set_suffix(ruler, suffix.to_string());
            }
        }

        renumber_population(&self.settings, pop, &self.cache);

        if self.settings.nicknames_enabled {
            let rulers: Vec<PersonId> = self.current_rulers.values().copied().collect();
            for ruler in rulers {
                self.assign_nickname(pop, ruler);
            }
        }
        tracing::info!(
            realms = self.current_rulers.len(),
            "game-load name resolution complete"
        );
    }

    fn on_person_born(&mut self, pop: &Population, person: PersonId) {
        resolve_surname(
            &self.settings,
            pop,
            &self.cache,
            &self.pool,
            &mut self.rng,
            person,
        );
        renumber_person(&self.settings, pop, &self.cache, person);
    }

    fn on_ruler_changed(&mut self, pop: &Population, realm: RealmId, new_ruler: Option<PersonId>) {
        let old_ruler = self.current_rulers.get(&realm).copied();
        if let Some(old_ruler) = old_ruler {
            self.demote_ruler(pop, old_ruler);
        }

        let Some(king) = new_ruler else {
            self.current_rulers.remove(&realm);
            return;
        };

        self.cache.clear_unit_surname(king);
        resolve_surname(
            &self.settings,
            pop,
            &self.cache,
            &self.pool,
            &mut self.rng,
            king,
        );

        if let Some(person) = pop.person(king) {
            let entry =
                self.tracker
                    .record_ruler_change(realm, king, &person.given_name, &self.cache);
            tracing::debug!(realm = realm.0, ruler = %entry, "recorded ruler change");
        }

        self.current_rulers.insert(realm, king);
        if self.settings.nicknames_enabled {
            self.assign_nickname(pop, king);
        }
    }

    fn on_realm_created(&mut self, pop: &Population, realm: RealmId) {
        let Some(ruler) = pop.realm_leader(realm) else {
            return;
        };

        self.cache.clear_unit_surname(ruler);
        resolve_surname(
            &self.settings,
            pop,
            &self.cache,
            &self.pool,
            &mut self.rng,
            ruler,
        );

        if let Some(person) = pop.person(ruler) {
            self.tracker.initialize_realm(realm, &person.given_name);
        }
        self.current_rulers.entry(realm).or_insert(ruler);

        // A restored history may already carry an ordinal for this ruler
        if let Some(suffix) = self.tracker.last_recorded_suffix(realm) {
            self.cache.set_suffix(ruler, suffix.to_string());
        }

        if self.settings.nicknames_enabled {
            self.assign_nickname(pop, ruler);
        }
    }

    fn on_realm_destroyed(&mut self, pop: &Population, realm: RealmId) {
        if self.tracker.remove_realm(realm) {
            tracing::debug!(realm = realm.0, "discarded succession history of dissolved realm");
        }
        if let Some(old_ruler) = self.current_rulers.remove(&realm) {
            self.demote_ruler(pop, old_ruler);
        }
    }

    /// Strip ruler-only decorations and re-resolve the person as an
    /// ordinary unit member
    fn demote_ruler(&mut self, pop: &Population, ruler: PersonId) {
        self.cache.clear_nickname(ruler);
        self.cache.clear_suffix(ruler);
        self.cache.clear_unit_surname(ruler);

        resolve_surname(
            &self.settings,
            pop,
            &self.cache,
            &self.pool,
            &mut self.rng,
            ruler,
        );
        renumber_person(&self.settings, pop, &self.cache, ruler);
    }

    fn assign_nickname(&mut self, pop: &Population, ruler: PersonId) {
        // Always cleared before recomputation, even when no rule matches
        self.cache.clear_nickname(ruler);
        let Some(person) = pop.person(ruler) else {
            return;
        };
        if let Some(nickname) = select_nickname(&self.settings.nickname_rules, person, &mut self.rng)
        {
            self.cache.set_nickname(ruler, nickname, ruler);
        }
    }

    fn snapshot_rulers(&mut self, pop: &Population) {
        self.current_rulers.clear();
        for &realm in pop.realms.keys() {
            if let Some(leader) = pop.realm_leader(realm) {
                self.current_rulers.insert(realm, leader);
            }
        }
    }

    fn initialize_histories(&mut self, pop: &Population) {
        let mut realm_ids: Vec<_> = pop.realms.keys().copied().collect();
        realm_ids.sort_by_key(|r| r.0);
        for realm in realm_ids {
            if let Some(name) = pop
                .realm_leader(realm)
                .and_then(|leader| pop.person(leader))
                .map(|p| p.given_name.clone())
            {
                self.tracker.initialize_realm(realm, &name);
            }
        }
    }

    // ── persistence ────────────────────────────────────────────────────

    /// Serialize succession histories (living realms only) and free-mode
    /// surnames, verbatim and in stable order
    pub fn export_save(&self, pop: &Population) -> SaveData {
        let mut histories: Vec<SuccessionRecord> = self
            .tracker
            .realms()
            .filter(|(realm, _)| pop.realm(**realm).is_some_and(|r| r.alive))
            .map(|(realm, rulers)| SuccessionRecord {
                realm: *realm,
                rulers: rulers.clone(),
            })
            .collect();
        histories.sort_by_key(|r| r.realm.0);

        let surnames = self
            .cache
            .free_surname_entries()
            .into_iter()
            .map(|(person, surname)| SurnameRecord { person, surname })
            .collect();

        SaveData { histories, surnames }
    }

    /// Rebuild in-memory state from save records, silently dropping
    /// records whose realm or person no longer resolves. Call before
    /// delivering `GameLoaded`.
    pub fn import_save(&mut self, pop: &Population, data: SaveData) {
        self.tracker.clear();
        for record in data.histories {
            if pop.realm(record.realm).is_some_and(|r| r.alive) {
                self.tracker.restore(record.realm, record.rulers);
            }
        }

        self.clear_surname_data();
        for record in data.surnames {
            if pop.person(record.person).is_some() {
                self.cache.set_free_surname(record.person, record.surname);
            }
        }
    }

    // ── manual/maintenance operations ──────────────────────────────────

    /// Host-driven surname change for one person, propagated to their
    /// spouse and minor children in the same unit
    pub fn set_surname_manual(&mut self, pop: &Population, id: PersonId, surname: &str) {
        if surname.trim().is_empty() {
            return;
        }
        let Some(person) = pop.person(id) else {
            return;
        };
        self.cache.set_free_surname(id, surname.to_string());
        if let Some(spouse) = person.spouse {
            if pop.person(spouse).is_some() {
                self.cache.set_free_surname(spouse, surname.to_string());
            }
        }
        for &child in &person.children {
            let minor_in_unit = pop
                .person(child)
                .is_some_and(|c| c.age < 18.0 && c.unit == person.unit);
            if minor_in_unit {
                self.cache.set_free_surname(child, surname.to_string());
            }
        }
    }

    /// Wipe all succession history data
    pub fn clear_history_data(&mut self) {
        self.tracker.clear();
        self.current_rulers.clear();
    }

    /// Wipe all free-mode surname data
    pub fn clear_surname_data(&self) {
        for (person, _) in self.cache.free_surname_entries() {
            self.cache.clear_free_surname(person);
        }
    }
}
