use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::UndirectedGraph;
use crate::state::{Color, OpOutcome, State};

/** Optional JSON state snapshot (§6.4) for round-trip regression tests. Not
part of the end-user CLI surface — gated behind the `snapshot` feature,
mirroring the original tool's `read_state`/`write_state` pair which
existed only to feed its own `check`-based test suite.

A serializable dump of every field of §3, with the two graphs stored as
external edge-list files rather than inlined (keeping the JSON small and
the graphs round-trippable with any standard graph-interchange tool).
*/
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateSnapshot {
    pub n_orig: usize,
    pub m_orig: usize,
    pub species_alive: Vec<bool>,
    pub character_alive: Vec<bool>,
    pub color: Vec<SerColor>,
    pub n: usize,
    pub m: usize,
    pub components: Vec<usize>,
    pub current_component: Vec<bool>,
    pub realize: Option<usize>,
    pub op_outcome: SerOpOutcome,
    /// filename holding the red-black graph's edge list
    pub red_black_file: String,
    /// filename holding the conflict graph's edge list
    pub conflict_file: String,
}

/// serde-friendly mirror of [`Color`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerColor {
    Black,
    Red,
}

impl From<Color> for SerColor {
    fn from(c: Color) -> Self {
        match c {
            Color::Black => SerColor::Black,
            Color::Red => SerColor::Red,
        }
    }
}

/// serde-friendly mirror of [`OpOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerOpOutcome {
    Fail,
    Activated,
    Freed,
}

impl From<OpOutcome> for SerOpOutcome {
    fn from(o: OpOutcome) -> Self {
        match o {
            OpOutcome::Fail => SerOpOutcome::Fail,
            OpOutcome::Activated => SerOpOutcome::Activated,
            OpOutcome::Freed => SerOpOutcome::Freed,
        }
    }
}

impl StateSnapshot {
    /// Builds a snapshot of `state`, naming the two graph dumps
    /// `red_black_file` / `conflict_file`.
    pub fn from_state(state: &State, red_black_file: &str, conflict_file: &str) -> Self {
        Self {
            n_orig: state.instance.n_orig,
            m_orig: state.instance.m_orig,
            species_alive: state.species_alive.clone(),
            character_alive: state.character_alive.clone(),
            color: state.color.iter().map(|&c| c.into()).collect(),
            n: state.n,
            m: state.m,
            components: state.components.clone(),
            current_component: state.current_component.clone(),
            realize: state.realize,
            op_outcome: state.op_outcome.into(),
            red_black_file: red_black_file.to_string(),
            conflict_file: conflict_file.to_string(),
        }
    }
}

/// Writes `graph`'s edges, one `u v` pair per line, to `path`.
pub fn dump_graph(graph: &UndirectedGraph, path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for u in 0..graph.num_vertices() {
        for v in graph.neighbors(u) {
            if u < v {
                writeln!(file, "{u} {v}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MatrixLoader;
    use std::rc::Rc;

    #[test]
    fn snapshot_round_trips_through_json() {
        let inst = Rc::new(
            MatrixLoader::new("2 2\n0 1\n1 0\n")
                .read_next()
                .unwrap()
                .unwrap(),
        );
        let state = State::initial(inst);
        let snap = StateSnapshot::from_state(&state, "rb.edges", "cf.edges");
        let json = serde_json::to_string(&snap).unwrap();
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
