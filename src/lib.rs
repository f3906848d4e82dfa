//! Decides whether a binary species-by-character matrix admits a
//! Constrained Persistent Perfect Phylogeny, and if so emits the witness: a
//! sequence of character realizations that reduces the instance to empty.
//!
//! The hard part is the search core: a backtracking decision tree over
//! character realizations on a dynamically mutated red-black graph, pruned
//! by the graph's connected components and checked against an accompanying
//! conflict graph. See [`search`] for the engine itself and [`state`] for
//! the working set each decision-tree node carries.

#![warn(missing_debug_implementations)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

/// per-level simplification: drop species/characters isolated by a realization
pub mod cleanup;

/// the component tracker: recompute + select the current component
pub mod components;

/// CLI surface definition
pub mod cli;

/// error kinds for the loader, the driver, and the CLI boundary
pub mod error;

/// the dynamic undirected graph backing the red-black and conflict graphs
pub mod graph;

/// the immutable instance and the matrix-stream loader
pub mod instance;

/// tracing/logging setup for the driver binary
pub mod logging;

/// the realization operator
pub mod realize;

/// the backtracking search engine
pub mod search;

/// JSON state snapshot for regression tests (`snapshot` feature)
#[cfg(any(test, feature = "snapshot"))]
pub mod snapshot;

/// per-node working set: the two graphs, the status arrays, the derived
/// fields, and the per-level search bookkeeping
pub mod state;

/// the strategy callback and the reference `alphabetic` ordering
pub mod strategy;
