//! Change detection between what is sounding and what was last drawn.

/// True iff the sequences differ in length or in any element.
pub fn has_changed<T: PartialEq>(current: &[T], previous: &[T]) -> bool {
    current != previous
}
