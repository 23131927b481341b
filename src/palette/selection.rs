use super::filter::VISIBLE_ROWS;

/// Moves the highlight `offset` rows through `rows`.
///
/// The window is the first `min(VISIBLE_ROWS, rows.len())` rows. Stepping
/// past its bottom wraps to the top, stepping above the top clamps to the
/// last visible row. A highlight that is not among `rows` snaps to the
/// first row.
pub fn move_selection<T>(current: Option<T>, offset: isize, rows: &[T]) -> Option<T>
where
    T: Copy + PartialEq,
{
    let first = *rows.first()?;
    let window = rows.len().min(VISIBLE_ROWS);

    let Some(index) = current.and_then(|id| rows.iter().position(|row| *row == id)) else {
        return Some(first);
    };

    let target = index as isize + offset;
    let next = if target < 0 {
        window - 1
    } else if target as usize >= window {
        0
    } else {
        target as usize
    };
    rows.get(next).copied()
}
