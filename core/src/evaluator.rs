use crate::*;

/// Cells still hidden, flagged or question-marked.
pub fn uncleared_count(visible: &VisibleMap) -> CellCount {
    visible.count_where(TileKind::is_uncleared)
}

/// The game is won once the only cells left uncleared are exactly as many as the bombs.
///
/// Flags are not checked against the truth: a flag counts as uncleared either way.
pub fn check_win(visible: &VisibleMap, bomb_count: CellCount) -> bool {
    uncleared_count(visible) == bomb_count
}
