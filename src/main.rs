//! Regnal Names - Demo Entry Point
//!
//! Builds a small sample population, replays a sequence of lifecycle
//! events through the engine, and prints the resolved display names at
//! each step.

use regnal_names::core::config::{load_nickname_rules, EngineSettings};
use regnal_names::core::error::Result;
use regnal_names::core::types::{PersonId, RealmId, Sex, TraitCategory, UnitId};
use regnal_names::names::{LifecycleEvent, NameEngine};
use regnal_names::world::{Person, Population, Realm, Unit};

use std::collections::HashMap;
use std::path::Path;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("regnal_names=debug")
        .init();

    tracing::info!("Regnal Names demo starting...");

    let mut settings = EngineSettings::default();
    settings.nickname_rules = load_nickname_rules(Path::new("nicknames.toml"))?;

    let mut engine = NameEngine::new(settings, 0xC0FFEE)?;
    let mut population = build_sample_population();

    engine.handle_event(&population, LifecycleEvent::NewGameStarted);
    println!("\n=== New campaign ===");
    print_court(&engine, &population);

    // The old king dies; his son takes the throne under the same name.
    if let Some(king) = population.person_mut(PersonId(1)) {
        king.alive = false;
    }
    promote(&mut population, UnitId(1), PersonId(3));
    engine.handle_event(
        &population,
        LifecycleEvent::RulerChanged {
            realm: RealmId(1),
            new_leading_unit: UnitId(1),
        },
    );
    engine.handle_event(&population, LifecycleEvent::DailyTick);
    println!("\n=== After succession ===");
    print_court(&engine, &population);

    // A rival house seizes the realm, then the dynasty reclaims it.
    engine.handle_event(
        &population,
        LifecycleEvent::RulerChanged {
            realm: RealmId(1),
            new_leading_unit: UnitId(2),
        },
    );
    engine.handle_event(
        &population,
        LifecycleEvent::RulerChanged {
            realm: RealmId(1),
            new_leading_unit: UnitId(1),
        },
    );
    println!("\n=== After restoration ===");
    print_court(&engine, &population);

    println!("\nSuccession history:");
    if let Some(history) = engine.tracker().history(RealmId(1)) {
        for entry in history {
            println!("  {}", entry);
        }
    }

    let save = engine.export_save(&population);
    tracing::info!(
        histories = save.histories.len(),
        surnames = save.surnames.len(),
        "exported save data"
    );
    Ok(())
}

fn build_sample_population() -> Population {
    let mut pop = Population::new();

    pop.insert_unit(Unit {
        id: UnitId(1),
        name: "dey Molarn".to_string(),
        leader: Some(PersonId(1)),
        members: vec![],
    });
    pop.insert_unit(Unit {
        id: UnitId(2),
        name: "fen Derngil".to_string(),
        leader: Some(PersonId(10)),
        members: vec![],
    });
    pop.insert_realm(Realm {
        id: RealmId(1),
        name: "Vlandia".to_string(),
        leading_unit: Some(UnitId(1)),
        alive: true,
    });

    let mut king = person(1, "Harlaus", 55.0, Sex::Male, UnitId(1));
    king.spouse = Some(PersonId(2));
    king.children = vec![PersonId(3)];
    king.traits.insert(TraitCategory::Honor, 2);
    pop.insert_person(king);

    let mut queen = person(2, "Liena", 50.0, Sex::Female, UnitId(1));
    queen.spouse = Some(PersonId(1));
    pop.insert_person(queen);

    let mut heir = person(3, "Harlaus", 28.0, Sex::Male, UnitId(1));
    heir.father = Some(PersonId(1));
    heir.mother = Some(PersonId(2));
    heir.traits.insert(TraitCategory::Valor, 2);
    pop.insert_person(heir);

    let mut rival = person(10, "Caladog", 45.0, Sex::Male, UnitId(2));
    rival.traits.insert(TraitCategory::Honor, -2);
    pop.insert_person(rival);

    pop
}

fn person(id: u64, name: &str, age: f32, sex: Sex, unit: UnitId) -> Person {
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
        unit: Some(unit),
        culture: "Vlandian".to_string(),
        traits: HashMap::new(),
        is_wanderer: false,
        is_notable: false,
        is_minor_faction: false,
    }
}

fn promote(pop: &mut Population, unit: UnitId, leader: PersonId) {
    if let Some(u) = pop.units.get_mut(&unit) {
        u.leader = Some(leader);
    }
}

fn print_court(engine: &NameEngine, pop: &Population) {
    for id in pop.alive_person_ids() {
        if let Some(person) = pop.person(id) {
            println!(
                "  {:?}: {}",
                id,
                engine.decorated_name(id, &person.given_name)
            );
        }
    }
}
