use crate::cleanup::cleanup;
use crate::graph::UndirectedGraph;
use crate::instance::{CharacterId, Instance};
use crate::state::{Color, OpOutcome, State};

/// Outcome of attempting to realize a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealizeResult {
    /// the realization succeeded; `dst` now holds the child state
    Applied,
    /// the character was `Red` and some current-component species was not
    /// adjacent to it: no consistent child state exists, `dst` is untouched
    Infeasible,
}

/** The realization operator (§4.4): applies realization of character `c`
(which must be alive and lie in `src.current_component`) to `src`,
overwriting `dst` in place with the resulting child state — `dst` is a
preallocated slot reused via [`State::copy_from`], not a fresh
allocation, per §9's "preallocated stack of state slots" model. `dst` is
left untouched on [`RealizeResult::Infeasible`].
*/
pub fn realize(src: &State, dst: &mut State, c: CharacterId) -> RealizeResult {
    debug_assert!(src.character_alive[c], "realizing a dead character");
    let cv = src.character_vertex(c);
    debug_assert!(
        src.current_component[cv],
        "strategy offered a character outside the current component"
    );

    if src.color[c] == Color::Red {
        let infeasible = (0..src.instance.n_orig).any(|v| {
            src.current_component[v] && v != cv && !src.red_black.has_edge(cv, v)
        });
        if infeasible {
            return RealizeResult::Infeasible;
        }
    }

    dst.copy_from(src);

    match src.color[c] {
        Color::Black => {
            for v in 0..src.instance.n_orig {
                if src.current_component[v] {
                    if src.red_black.has_edge(cv, v) {
                        dst.red_black.del_edge(cv, v);
                    } else {
                        dst.red_black.add_edge(cv, v);
                    }
                }
            }
            dst.color[c] = Color::Red;
            dst.op_outcome = OpOutcome::Activated;
        }
        Color::Red => {
            for v in 0..src.instance.n_orig {
                if src.current_component[v] && src.red_black.has_edge(cv, v) {
                    dst.red_black.del_edge(cv, v);
                }
            }
            dst.op_outcome = OpOutcome::Freed;
        }
    }

    dst.realize = Some(c);
    cleanup(dst);
    dst.components = dst.red_black.components();
    rebuild_conflict_into(&mut dst.conflict, &dst.instance, &dst.species_alive, &dst.character_alive);
    dst.check_invariants();
    RealizeResult::Applied
}

/** Rebuilds the conflict graph from scratch (§3.3, §4.4 step 7): two
characters are adjacent iff, restricted to alive species, their joint
state table contains all four `{00, 01, 10, 11}` combinations. Allocates
a fresh graph; see [`rebuild_conflict_into`] for the allocation-free form
used on the search engine's hot path. */
pub fn rebuild_conflict(
    instance: &Instance,
    species_alive: &[bool],
    character_alive: &[bool],
) -> UndirectedGraph {
    let mut conflict = UndirectedGraph::new(instance.m_orig);
    rebuild_conflict_into(&mut conflict, instance, species_alive, character_alive);
    conflict
}

/// Same definition as [`rebuild_conflict`], but overwrites an existing
/// graph in place rather than allocating a new one.
pub fn rebuild_conflict_into(
    conflict: &mut UndirectedGraph,
    instance: &Instance,
    species_alive: &[bool],
    character_alive: &[bool],
) {
    conflict.nuke_edges();
    let m = instance.m_orig;
    let alive_chars: Vec<usize> = (0..m).filter(|&c| character_alive[c]).collect();
    for (i, &c1) in alive_chars.iter().enumerate() {
        for &c2 in &alive_chars[i + 1..] {
            let mut seen = [[false; 2]; 2];
            for s in 0..instance.n_orig {
                if species_alive[s] {
                    let v1 = instance.value(s, c1) as usize;
                    let v2 = instance.value(s, c2) as usize;
                    seen[v1][v2] = true;
                }
            }
            if seen[0][0] && seen[0][1] && seen[1][0] && seen[1][1] {
                conflict.add_edge(c1, c2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MatrixLoader;
    use std::rc::Rc;

    fn load(s: &str) -> Rc<Instance> {
        Rc::new(MatrixLoader::new(s).read_next().unwrap().unwrap())
    }

    #[test]
    fn conflict_graph_matches_four_gamete_definition() {
        // four species, four characters: conflict edges {0-1, 0-2, 1-3, 2-3}
        let inst = load("4 4\n0 0 1 1\n0 1 0 1\n1 0 1 0\n1 1 0 0\n");
        let alive_s = vec![true; 4];
        let alive_c = vec![true; 4];
        let conflict = rebuild_conflict(&inst, &alive_s, &alive_c);
        assert!(conflict.has_edge(0, 1));
        assert!(conflict.has_edge(0, 2));
        assert!(conflict.has_edge(1, 3));
        assert!(conflict.has_edge(2, 3));
        assert!(!conflict.has_edge(0, 3));
        assert!(!conflict.has_edge(1, 2));
    }

    #[test]
    fn activating_black_character_toggles_edges_in_component() {
        // symmetric difference of edge sets is exactly the species in
        // the current component incident to the realized character's vertex
        let inst = load("2 1\n1 0\n");
        let mut state = State::initial(inst);
        state.current_component = vec![true, true, true]; // species 0,1 + char 0
        let cv = state.character_vertex(0);
        assert!(state.red_black.has_edge(cv, 0));
        assert!(!state.red_black.has_edge(cv, 1));

        let mut dst = State::empty_shell(Rc::clone(&state.instance));
        match realize(&state, &mut dst, 0) {
            RealizeResult::Applied => {
                // edge to species 0 toggled off, edge to species 1 toggled on
                assert!(!dst.red_black.has_edge(cv, 0) || !dst.species_alive[0]);
                // species 1 gained the edge (unless cleanup removed it, which
                // it won't since it now has degree 1)
                assert!(dst.character_alive[0]);
            }
            RealizeResult::Infeasible => panic!("activating a BLACK character cannot fail"),
        }
    }

    #[test]
    fn freeing_red_character_fails_when_not_all_adjacent() {
        let inst = load("2 1\n1 0\n");
        let mut state = State::initial(inst);
        state.color[0] = Color::Red;
        state.current_component = vec![true, true, true];
        let mut dst = State::empty_shell(Rc::clone(&state.instance));
        // species 1 is not adjacent to character 0 -> infeasible
        assert_eq!(realize(&state, &mut dst, 0), RealizeResult::Infeasible);
    }

    #[test]
    fn freeing_red_character_succeeds_when_fully_adjacent() {
        let inst = load("2 1\n1 1\n");
        let mut state = State::initial(inst);
        state.color[0] = Color::Red;
        state.current_component = vec![true, true, true];
        let mut dst = State::empty_shell(Rc::clone(&state.instance));
        match realize(&state, &mut dst, 0) {
            RealizeResult::Applied => {
                assert!(!dst.character_alive[0]);
            }
            RealizeResult::Infeasible => panic!("fully adjacent RED character must free"),
        }
    }
}
