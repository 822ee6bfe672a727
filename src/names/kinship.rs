//! Blood-relative traversal over the host's kinship graph
//!
//! The graph is mutable and marriage loops can close cycles, so the
//! visited set is the correctness guarantee: `insert` returning false is
//! the recursion stop, not the depth bound.

use ahash::AHashSet;

use crate::core::types::PersonId;
use crate::world::Population;

/// Collect the blood relatives of `root`, bounded by generation depth in
/// each direction.
///
/// The result always contains `root`. Upward traversal adds both parents
/// at every level plus each visited ancestor's other children; downward
/// traversal adds children. When `include_extended` is set, aunts/uncles
/// and their children are added too, but only relative to the root's own
/// parents. Dangling references are skipped; an unknown root yields the
/// root-only set.
pub fn blood_relatives(
    pop: &Population,
    root: PersonId,
    generations_up: u32,
    generations_down: u32,
    include_extended: bool,
) -> AHashSet<PersonId> {
    let mut relatives = AHashSet::new();
    relatives.insert(root);
    if pop.person(root).is_none() {
        return relatives;
    }

    add_ancestors_and_siblings(pop, root, generations_up as i64, &mut relatives);
    if include_extended {
        add_extended_family(pop, root, &mut relatives);
    }
    add_descendants(pop, root, generations_down as i64, &mut relatives);

    relatives
}

fn add_ancestors_and_siblings(
    pop: &Population,
    id: PersonId,
    depth: i64,
    relatives: &mut AHashSet<PersonId>,
) {
    if depth < 0 {
        return;
    }
    let Some(person) = pop.person(id) else {
        return;
    };

    for parent in [person.father, person.mother].into_iter().flatten() {
        if pop.person(parent).is_some() && relatives.insert(parent) {
            add_ancestors_and_siblings(pop, parent, depth - 1, relatives);
        }
        // Siblings: the parent's other children
        if let Some(p) = pop.person(parent) {
            for &sibling in &p.children {
                if sibling != id && pop.person(sibling).is_some() {
                    relatives.insert(sibling);
                }
            }
        }
    }
}

/// Aunts/uncles of the root plus their children. Applied to the root's
/// direct parents only, never recursively up the tree.
fn add_extended_family(pop: &Population, root: PersonId, relatives: &mut AHashSet<PersonId>) {
    let Some(person) = pop.person(root) else {
        return;
    };

    for parent in [person.father, person.mother].into_iter().flatten() {
        let Some(p) = pop.person(parent) else {
            continue;
        };
        for grandparent in [p.father, p.mother].into_iter().flatten() {
            let Some(gp) = pop.person(grandparent) else {
                continue;
            };
            for &aunt_uncle in &gp.children {
                if aunt_uncle == parent {
                    continue;
                }
                let Some(au) = pop.person(aunt_uncle) else {
                    continue;
                };
                relatives.insert(aunt_uncle);
                for &cousin in &au.children {
                    if pop.person(cousin).is_some() {
                        relatives.insert(cousin);
                    }
                }
            }
        }
    }
}

fn add_descendants(pop: &Population, id: PersonId, depth: i64, relatives: &mut AHashSet<PersonId>) {
    if depth < 0 {
        return;
    }
    let Some(person) = pop.person(id) else {
        return;
    };
    for &child in &person.children {
        if pop.person(child).is_some() && relatives.insert(child) {
            add_descendants(pop, child, depth - 1, relatives);
        }
    }
}
