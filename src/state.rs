use std::collections::VecDeque;
use std::rc::Rc;

use crate::graph::{UndirectedGraph, VertexId};
use crate::instance::{CharacterId, Instance, SpeciesId};

/// Whether a character is currently inactive (`Black`, its original
/// 1-entries stand as black edges) or active (`Red`, previously realized).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

/// The result of the realization attempted at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    /// no realization has been recorded at this level yet (the root state),
    /// or the last attempt was infeasible.
    Fail,
    /// a `Black -> Red` realization (the character was activated).
    Activated,
    /// a `Red -> removed` realization (the character was freed).
    Freed,
}

/** One node of the decision tree: the complete state described by §3 —
two graphs, the alive/color arrays, the derived component fields, and the
per-level search bookkeeping, bundled into one struct so a search step is
a single in-place copy (§9: the engine holds one of these per preallocated
stack slot and reuses it, rather than allocating a fresh one per descent).
*/
#[derive(Debug, Clone)]
pub struct State {
    /// original instance, shared read-only by every state in one search
    pub instance: Rc<Instance>,

    pub red_black: UndirectedGraph,
    pub conflict: UndirectedGraph,

    pub species_alive: Vec<bool>,
    pub character_alive: Vec<bool>,
    pub color: Vec<Color>,
    pub n: usize,
    pub m: usize,

    pub components: Vec<usize>,
    pub current_component: Vec<bool>,

    pub realize: Option<CharacterId>,
    pub op_outcome: OpOutcome,
    pub tried: Vec<CharacterId>,
    pub queue: VecDeque<CharacterId>,
    /// level to jump back to once `queue` is exhausted; `-1` is the
    /// sentinel "below root" (see §4.9).
    pub backtrack_level: isize,
}

impl State {
    /// vertex id of character `c` in the red-black graph's numbering.
    pub fn character_vertex(&self, c: CharacterId) -> VertexId {
        self.instance.character_vertex(c)
    }

    /** Builds the initial state for a freshly loaded instance: every
    species/character alive, every color `Black`, red-black edges placed
    wherever the matrix has a `1`, and the conflict graph built from the
    four-gamete test. */
    pub fn initial(instance: Rc<Instance>) -> Self {
        let n_orig = instance.n_orig;
        let m_orig = instance.m_orig;
        let num_vertices = n_orig + m_orig;

        let mut red_black = UndirectedGraph::new(num_vertices);
        for s in 0..n_orig {
            for c in 0..m_orig {
                if instance.value(s, c) == 1 {
                    red_black.add_edge(s, instance.character_vertex(c));
                }
            }
        }

        let species_alive = vec![true; n_orig];
        let character_alive = vec![true; m_orig];
        let conflict = crate::realize::rebuild_conflict(&instance, &species_alive, &character_alive);

        let mut state = Self {
            instance,
            red_black,
            conflict,
            species_alive,
            character_alive,
            color: vec![Color::Black; m_orig],
            n: n_orig,
            m: m_orig,
            components: vec![0; num_vertices],
            current_component: vec![false; num_vertices],
            realize: None,
            op_outcome: OpOutcome::Fail,
            tried: Vec::new(),
            queue: VecDeque::new(),
            backtrack_level: -1,
        };
        state.components = state.red_black.components();
        state
    }

    /** Builds an empty, correctly-sized slot for `instance`: edgeless
    graphs and all-dead arrays, never meant to be read before a
    [`State::copy_from`] fills it in. This is the preallocation the search
    engine's stack of slots is built from (§9: "a preallocated stack of
    state slots ... each slot owns its graphs and arrays exclusively"). */
    pub fn empty_shell(instance: Rc<Instance>) -> Self {
        let n_orig = instance.n_orig;
        let m_orig = instance.m_orig;
        let num_vertices = n_orig + m_orig;
        Self {
            instance,
            red_black: UndirectedGraph::new(num_vertices),
            conflict: UndirectedGraph::new(m_orig),
            species_alive: vec![false; n_orig],
            character_alive: vec![false; m_orig],
            color: vec![Color::Black; m_orig],
            n: 0,
            m: 0,
            components: vec![0; num_vertices],
            current_component: vec![false; num_vertices],
            realize: None,
            op_outcome: OpOutcome::Fail,
            tried: Vec::new(),
            queue: VecDeque::new(),
            backtrack_level: -1,
        }
    }

    /** Overwrites `self` with an independent copy of every field of §3
    from `src`, except the per-level search bookkeeping, which is reset
    per §4.4 step 1 ("search bookkeeping is not copied"). Reuses `self`'s
    existing allocations (via `Vec::clone_from` and
    `UndirectedGraph::copy_from`) instead of replacing them, so repeatedly
    calling this on the same preallocated slot does no hot-path allocation.
    */
    pub fn copy_from(&mut self, src: &Self) {
        self.instance = Rc::clone(&src.instance);
        self.red_black.copy_from(&src.red_black);
        self.conflict.copy_from(&src.conflict);
        self.species_alive.clone_from(&src.species_alive);
        self.character_alive.clone_from(&src.character_alive);
        self.color.clone_from(&src.color);
        self.n = src.n;
        self.m = src.m;
        self.components.clone_from(&src.components);
        self.current_component.clone_from(&src.current_component);
        self.realize = None;
        self.op_outcome = OpOutcome::Fail;
        self.tried.clear();
        self.queue.clear();
        self.backtrack_level = -1;
    }

    /** Panics (via `debug_assert!`) if any invariant of §3.6 is violated.
    Compiled in under debug builds only, per §7's `IntegrityViolation`
    ("must never have side effects other than abort"). */
    pub fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let n_orig = self.instance.n_orig;
        let m_orig = self.instance.m_orig;

        debug_assert_eq!(
            self.n,
            self.species_alive.iter().filter(|&&a| a).count(),
            "alive species count out of sync"
        );
        debug_assert_eq!(
            self.m,
            self.character_alive.iter().filter(|&&a| a).count(),
            "alive character count out of sync"
        );

        for s in 0..n_orig {
            if !self.species_alive[s] {
                debug_assert_eq!(self.red_black.degree(s), 0, "dead species has an edge");
            }
        }
        for c in 0..m_orig {
            let cv = self.instance.character_vertex(c);
            if !self.character_alive[c] {
                debug_assert_eq!(self.red_black.degree(cv), 0, "dead character has an edge");
            }
        }

        debug_assert_eq!(
            self.components.len(),
            n_orig + m_orig,
            "every vertex must have a component id"
        );
    }
}
