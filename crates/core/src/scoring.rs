//! Scoring module - table-driven chain scoring
//!
//! Compatibility note:
//! Tables and the multiplier formula match the retail Puyo Puyo rules the
//! original control tooling was tuned against. In particular:
//! - Every table clamps to its last entry when indexed past the end.
//! - The per-pass multiplier is clamped to [1, 999], so even a plain
//!   single-group clear scores.
//! - Points are `10 x cells x multiplier`, colored cells only.

/// Chain power by pass number (pass 0 is the drop itself)
pub const CHAIN_POWER: [u32; 9] = [0, 8, 16, 32, 64, 128, 256, 512, 999];

/// Bonus by distinct colors cleared in one pass
pub const COLOR_BONUS: [u32; 6] = [0, 0, 3, 6, 12, 24];

/// Bonus by group size, summed over all groups cleared in one pass
pub const GROUP_BONUS: [u32; 12] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7, 10];

/// Multiplier clamp bounds
pub const MULTIPLIER_MIN: u32 = 1;
pub const MULTIPLIER_MAX: u32 = 999;

#[inline]
fn clamped(table: &[u32], index: usize) -> u32 {
    table[index.min(table.len() - 1)]
}

/// Group-size bonus for a single cleared group
pub fn group_bonus(size: usize) -> u32 {
    clamped(&GROUP_BONUS, size)
}

/// Score for one elimination pass.
///
/// `pass` is the 0-based chain pass number; `cells` counts colored cells
/// cleared this pass; `distinct_colors` and `group_bonus_sum` come from the
/// same pass's group accounting.
pub fn pass_score(pass: u32, cells: u32, distinct_colors: u32, group_bonus_sum: u32) -> u32 {
    let multiplier = (clamped(&CHAIN_POWER, pass as usize)
        + clamped(&COLOR_BONUS, distinct_colors as usize)
        + group_bonus_sum)
        .clamp(MULTIPLIER_MIN, MULTIPLIER_MAX);
    10 * cells * multiplier
}
