use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

/// Reveals `start` and, when it is a zero, every zero connected to it plus the numbered border
/// of that region.
///
/// Returns how many cells changed. A `start` that is not hidden, or that holds a bomb, is left
/// alone. Cells the player flagged inside the region are uncovered like any other.
pub fn flood_reveal(truth: &TruthMap, visible: &mut VisibleMap, start: Coord2) -> CellCount {
    if visible[start] != TileKind::Hidden {
        return 0;
    }

    match truth[start] {
        tile if tile.is_zero() => {}
        TileKind::Count(_) => return CellCount::from(visible.reveal_from(truth, start)),
        other => {
            log::warn!("Refusing to flood reveal {:?} at {:?}", other, start);
            return 0;
        }
    }

    let mut changed: CellCount = 0;
    let mut visited = BTreeSet::new();
    let mut queued = BTreeSet::from([start]);
    let mut to_visit = VecDeque::from([start]);
    log::trace!("Starting flood-fill from {:?}", start);

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        if visible.reveal_from(truth, visit_coords) {
            changed += 1;
        }

        for pos in truth.iter_neighbors(visit_coords) {
            match truth[pos] {
                tile if tile.is_zero() => {
                    if !visited.contains(&pos) && queued.insert(pos) {
                        to_visit.push_back(pos);
                    }
                }
                TileKind::Count(_) => {
                    if visible.reveal_from(truth, pos) {
                        changed += 1;
                        log::trace!("Flood opened border tile at {:?}", pos);
                    }
                }
                _ => {}
            }
        }
    }

    log::debug!(
        "Flood-fill from {:?} expanded {} zeros, {} tiles changed",
        start,
        visited.len(),
        changed
    );
    changed
}
