use crate::snake::Snake;

/// Self-collision test for a candidate body (new head prepended, tail not yet dropped).
///
/// The head is compared against indices `1..=len-2` only. The oldest segment is
/// skipped because it vacates its cell during the same tick, so following your own
/// tail is legal. Wall hits are checked by the engine before this runs.
#[must_use]
pub fn collides(candidate: &Snake) -> bool {
    let len = candidate.len();
    if len < 3 {
        return false;
    }

    let head = candidate.head();
    candidate
        .segments()
        .skip(1)
        .take(len - 2)
        .any(|segment| *segment == head)
}
