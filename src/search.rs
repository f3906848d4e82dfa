use std::rc::Rc;

use crate::cleanup::cleanup;
use crate::components::{choose_current_component, component_borders, update_components};
use crate::instance::{CharacterId, Instance};
use crate::realize::{realize, RealizeResult};
use crate::state::{OpOutcome, State};
use crate::strategy::Strategy;

/// Result of running the search to completion on one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// a witness was found: the sequence of realized characters
    Solved(Vec<CharacterId>),
    /// the decision tree was exhausted without reaching `n == 0`
    NotFound,
}

/** Drives the decision tree to completion for a strategy `S` (§4.8-§4.9):
a backtracking traversal over character realizations, with chronological
backtracking tightened by a forced-realization backjump and a connected-
component backjump. */
#[derive(Debug)]
pub struct SearchEngine<S: Strategy> {
    strategy: S,
}

impl<S: Strategy> SearchEngine<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /** Runs `exhaustive_search` (§4.9) on `instance` over a preallocated
    stack of `D = n_orig + 2*m_orig + 1` state slots (§3.5, §9): each slot
    is allocated once up front and every descent/backtrack overwrites a
    slot in place via [`State::copy_from`] rather than growing or
    shrinking a `Vec<State>`. No slot is freed until `run` returns. */
    pub fn run(&self, instance: Rc<Instance>) -> SearchOutcome {
        let depth = instance.n_orig + 2 * instance.m_orig + 1;
        let mut states: Vec<State> = Vec::with_capacity(depth);
        states.push(State::initial(Rc::clone(&instance)));
        for _ in 1..depth {
            states.push(State::empty_shell(Rc::clone(&instance)));
        }
        self.init_node(&mut states[0]);

        let mut level: isize = 0;
        loop {
            if level < 0 {
                return SearchOutcome::NotFound;
            }
            let lvl = level as usize;
            debug_assert!(lvl < depth, "search exceeded its depth bound");
            if states[lvl].n == 0 {
                let witness = states[..=lvl].iter().filter_map(|s| s.realize).collect();
                return SearchOutcome::Solved(witness);
            }
            level = self.next_node(&mut states, lvl);
        }
    }

    /// Per-level node initialization (§4.8).
    fn init_node(&self, state: &mut State) {
        cleanup(state);
        update_components(state);
        if state.n == 0 || !choose_current_component(state) {
            state.queue.clear();
            state.tried.clear();
            return;
        }

        let mut ordered: Vec<CharacterId> = self
            .strategy
            .order(state)
            .into_iter()
            .filter(|&c| state.current_component[state.character_vertex(c)])
            .collect();
        if let Some(best) = ordered
            .iter()
            .enumerate()
            .max_by_key(|(_, &c)| state.red_black.degree(state.character_vertex(c)))
            .map(|(i, _)| i)
        {
            ordered.swap(0, best);
        }
        state.queue = ordered.into_iter().collect();
        state.tried.clear();
    }

    /** `next_node` (§4.9): advances the decision tree from `level` by
    writing the child into the preallocated slot `states[level + 1]`,
    returning the level to continue from (`-1` signals a fully exhausted
    tree). Never pushes or truncates `states`. */
    fn next_node(&self, states: &mut [State], level: usize) -> isize {
        if states[level].queue.is_empty() {
            return states[level].backtrack_level;
        }

        let c = states[level].queue.pop_front().expect("checked non-empty above");
        states[level].tried.push(c);

        let outcome = {
            let (left, right) = states.split_at_mut(level + 1);
            let src = &left[level];
            let dst = &mut right[0];
            realize(src, dst, c)
        };

        match outcome {
            RealizeResult::Infeasible => level as isize,
            RealizeResult::Applied => {
                states[level + 1].backtrack_level = level as isize - 1;

                if states[level + 1].n != 0 {
                    self.init_node(&mut states[level + 1]);

                    // forced-realization backjump: skip past ancestors whose
                    // own operation was a forced negative (Freed) realization
                    let mut ancestor = level as isize;
                    while ancestor >= 0 && states[ancestor as usize].op_outcome != OpOutcome::Activated {
                        ancestor -= 1;
                    }
                    states[level + 1].backtrack_level = ancestor;
                }

                // component-boundary jump: only meaningful once the parent
                // level is itself exhausted
                if states[level].queue.is_empty() {
                    for root in 0..=level {
                        if component_borders(states, root, level + 1) {
                            states[level + 1].backtrack_level = root as isize - 1;
                            break;
                        }
                    }
                }

                (level + 1) as isize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MatrixLoader;
    use crate::state::Color;
    use crate::strategy::Alphabetic;

    fn load(s: &str) -> Rc<Instance> {
        Rc::new(MatrixLoader::new(s).read_next().unwrap().unwrap())
    }

    fn replay(instance: &Instance, witness: &[CharacterId]) -> State {
        let rc_instance = Rc::new(instance.clone());
        let mut state = State::initial(Rc::clone(&rc_instance));
        let mut next = State::empty_shell(Rc::clone(&rc_instance));
        let engine = SearchEngine::new(Alphabetic);
        for &c in witness {
            engine.init_node(&mut state);
            assert!(
                state.current_component[state.character_vertex(c)],
                "witness step {c} was not in the current component when applied"
            );
            match realize(&state, &mut next, c) {
                RealizeResult::Applied => std::mem::swap(&mut state, &mut next),
                RealizeResult::Infeasible => panic!("witness step {c} was infeasible"),
            }
        }
        state
    }

    #[test]
    fn already_empty_instance_needs_no_realization() {
        let inst = load("1 1\n0\n");
        let engine = SearchEngine::new(Alphabetic);
        match engine.run(inst) {
            SearchOutcome::Solved(witness) => assert!(witness.is_empty()),
            SearchOutcome::NotFound => panic!("an already-empty instance must be solvable"),
        }
    }

    #[test]
    fn single_one_entry_is_realized() {
        let inst = load("1 1\n1\n");
        let engine = SearchEngine::new(Alphabetic);
        match engine.run(inst) {
            SearchOutcome::Solved(witness) => assert_eq!(witness, vec![0]),
            SearchOutcome::NotFound => panic!("a single present entry must be solvable"),
        }
    }

    #[test]
    fn four_species_four_characters_solves_and_witness_replays_to_empty() {
        let inst = load("4 4\n0 0 1 1\n0 1 0 1\n1 0 1 0\n1 1 0 0\n");
        let engine = SearchEngine::new(Alphabetic);
        match engine.run(Rc::clone(&inst)) {
            SearchOutcome::Solved(witness) => {
                assert!(witness.len() <= 8);
                let end = replay(&inst, &witness);
                assert_eq!(end.n, 0);
            }
            SearchOutcome::NotFound => panic!("four pairwise-conflicting characters must still be solvable"),
        }
    }

    #[test]
    fn three_pairwise_conflicting_characters_solves() {
        let inst = load("6 3\n0 0 1\n0 1 0\n0 1 1\n1 0 0\n1 0 1\n1 1 0\n");
        let engine = SearchEngine::new(Alphabetic);
        match engine.run(Rc::clone(&inst)) {
            SearchOutcome::Solved(witness) => {
                assert!(witness.len() <= 6);
                let end = replay(&inst, &witness);
                assert_eq!(end.n, 0);
            }
            SearchOutcome::NotFound => panic!("three pairwise-conflicting characters must still be solvable"),
        }
    }

    #[test]
    fn isolated_species_is_cleaned_up_before_search() {
        let inst = load("5 5\n0 0 0 1 0\n0 1 0 0 0\n1 0 1 0 0\n1 1 0 0 0\n0 0 0 0 0\n");
        let engine = SearchEngine::new(Alphabetic);
        match engine.run(Rc::clone(&inst)) {
            SearchOutcome::Solved(witness) => {
                let end = replay(&inst, &witness);
                assert_eq!(end.n, 0);
            }
            SearchOutcome::NotFound => panic!("an instance with an isolated species must still be solvable"),
        }
    }

    #[test]
    fn determinism_across_runs() {
        let inst = load("6 3\n0 0 1\n0 1 0\n0 1 1\n1 0 0\n1 0 1\n1 1 0\n");
        let engine = SearchEngine::new(Alphabetic);
        let a = engine.run(Rc::clone(&inst));
        let b = engine.run(inst);
        assert_eq!(a, b);
    }

    #[test]
    fn exhausted_tree_reports_not_found() {
        // Species 1 is wired into the current component (via a synthetic
        // species-species edge, so cleanup can't drop it as isolated) but is
        // never adjacent to the lone character, which starts already Red.
        // Freeing it is infeasible, there is no other candidate in the
        // queue, and the root has no parent to backjump to: exhaustion.
        let inst = load("2 1\n1\n0\n");
        let mut root = State::initial(Rc::clone(&inst));
        root.red_black.add_edge(0, 1);
        root.color[0] = Color::Red;
        root.components = root.red_black.components();

        let depth = inst.n_orig + 2 * inst.m_orig + 1;
        let mut states: Vec<State> = Vec::with_capacity(depth);
        states.push(root);
        for _ in 1..depth {
            states.push(State::empty_shell(Rc::clone(&inst)));
        }

        let engine = SearchEngine::new(Alphabetic);
        engine.init_node(&mut states[0]);

        let mut level: isize = 0;
        let outcome = loop {
            if level < 0 {
                break SearchOutcome::NotFound;
            }
            let lvl = level as usize;
            if states[lvl].n == 0 {
                break SearchOutcome::Solved(
                    states[..=lvl].iter().filter_map(|s| s.realize).collect(),
                );
            }
            level = engine.next_node(&mut states, lvl);
        };
        assert_eq!(outcome, SearchOutcome::NotFound);
    }
}
