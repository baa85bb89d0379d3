//! Standard 13x13 matrix mapping: pairs on the diagonal, suited above it,
//! offsuit below it.

use crate::hand_keys::{rank_index, RANKS};

/// Cell key for a (row, column) pair of rank letters. Row is the left axis,
/// column the top axis.
pub fn cell_key_at(row: char, col: char) -> Option<String> {
    let row_idx = rank_index(row)?;
    let col_idx = rank_index(col)?;
    let key = if row_idx == col_idx {
        format!("{row}{col}")
    } else if row_idx < col_idx {
        format!("{row}{col}s")
    } else {
        format!("{col}{row}o")
    };
    Some(key)
}

/// All 169 cell keys in row-major grid order.
pub fn all_cell_keys() -> Vec<String> {
    let mut out = Vec::with_capacity(RANKS.len() * RANKS.len());
    for row in RANKS {
        for col in RANKS {
            if let Some(key) = cell_key_at(row, col) {
                out.push(key);
            }
        }
    }
    out
}
