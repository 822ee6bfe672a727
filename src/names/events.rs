//! Lifecycle triggers consumed from the host
//!
//! The host delivers these one at a time; handlers never run re-entrant.
//! Payloads carry ids only, the handler resolves them against the
//! population snapshot it is given.

use serde::{Deserialize, Serialize};

use crate::core::types::{PersonId, RealmId, UnitId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// A saved game finished loading
    GameLoaded,
    /// A fresh campaign started
    NewGameStarted,
    PersonBorn { person: PersonId, natural: bool },
    PersonsMarried { a: PersonId, b: PersonId },
    RulerChanged { realm: RealmId, new_leading_unit: UnitId },
    RealmCreated { realm: RealmId },
    RealmDestroyed { realm: RealmId },
    /// Periodic maintenance trigger
    DailyTick,
}
