//! Pure domain logic for the preflop decision chart.
//!
//! Everything here is deterministic and side-effect free. The conformance
//! harness calls into it to prove the shipped datasets agree with the
//! router's key derivation and the grid's cell-key grammar.

pub mod active_cells;
pub mod collate;
pub mod grid_map;
pub mod hand_keys;
pub mod router_key;
pub mod scenario_index;
pub mod state;

pub use hand_keys::is_valid_cell_key;
pub use router_key::{grid_key, GridState};
