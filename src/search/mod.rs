pub mod see;
pub mod tt;

/// Score of a mate at the root. Shared by every table and search that
/// exchanges scores, so it must not change.
pub const MATE0: i32 = 32_000;

/// Scores within this distance of `±MATE0` are mate scores and are stored
/// ply-shifted in the transposition table.
pub const MATE_MARGIN: i32 = 1_000;

/// True if `score` encodes a forced mate for either side.
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE0 - MATE_MARGIN
}
