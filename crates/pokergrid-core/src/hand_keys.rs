//! Cell key contract: `AA`..`22` on the diagonal, `AKs`..`32s` suited,
//! `AKo`..`32o` offsuit. Higher rank always comes first.
//!
//! This is stricter than a bare "two ranks plus optional `s`/`o`" pattern:
//! unsuffixed non-pairs (`AK`), suffixed pairs (`AAs`) and low-first keys
//! (`KAs`) are rejected, so datasets using them fail with
//! `E_SCENARIO_CELL_KEY`.

/// Rank alphabet, highest first. Row/column order of the grid.
pub const RANKS: [char; 13] = [
    'A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2',
];

pub fn rank_index(rank: char) -> Option<usize> {
    RANKS.iter().position(|&r| r == rank)
}

pub fn is_valid_cell_key(key: &str) -> bool {
    let mut chars = key.trim().chars();
    let (Some(hi), Some(lo)) = (chars.next(), chars.next()) else {
        return false;
    };
    let suffix = chars.next();
    if chars.next().is_some() {
        return false;
    }
    let (Some(hi_idx), Some(lo_idx)) = (rank_index(hi), rank_index(lo)) else {
        return false;
    };
    match suffix {
        None => hi_idx == lo_idx,
        Some('s') | Some('o') => hi_idx < lo_idx,
        Some(_) => false,
    }
}
