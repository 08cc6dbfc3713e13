//! Truncation and page info over an ordered result set.
//!
//! Stateless: every value is recomputed from the full sequence, so callers
//! must pass the same (cached) sequence to all three functions.

/// The first `first` elements, or the whole sequence when `first` is unset
/// or not smaller than its length
pub fn items<T>(seq: &[T], first: Option<usize>) -> &[T] {
    match first {
        Some(first) if first < seq.len() => &seq[..first],
        _ => seq,
    }
}

/// Length of the untruncated sequence
pub fn total_count<T>(seq: &[T]) -> usize {
    seq.len()
}

/// Whether elements exist past the first `first`
pub fn has_next_page<T>(seq: &[T], first: Option<usize>) -> bool {
    first.is_some_and(|first| seq.len() > first)
}
