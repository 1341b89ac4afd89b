//! Mapping terminal input onto move directions.

use crossterm::event::KeyCode;
use twenty48::Direction;

/// Minimum drag length, in terminal columns, that counts as a swipe.
///
/// Rows are counted double since a terminal cell is about twice as tall as
/// it is wide.
pub(super) const SWIPE_MIN_CELLS: i32 = 3;

/// Direction bound to a key: arrows, `w/a/s/d` in either case, and `h/j/k/l`.
pub(super) fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Some(Direction::Right),
        _ => None,
    }
}

/// Direction of a drag from one cell to another, if it is long enough.
///
/// The longer axis wins; equal lengths count as vertical.
pub(super) fn direction_for_swipe(dx: i32, dy: i32) -> Option<Direction> {
    let horizontal = dx.abs();
    let vertical = dy.abs().saturating_mul(2);

    if horizontal.max(vertical) < SWIPE_MIN_CELLS {
        return None;
    }

    let direction = if horizontal > vertical {
        if dx > 0 { Direction::Right } else { Direction::Left }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(direction)
}
