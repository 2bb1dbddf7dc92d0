/// Capacity an append grows to when the buffer is full: half again the
/// current capacity, but never less than `len + 1`.
///
/// Returns `None` when `len + 1` itself is not representable.
pub const fn grown_capacity(capacity: usize, len: usize) -> Option<usize> {
    let required = match len.checked_add(1) {
        Some(required) => required,
        None => return None,
    };
    let amortized = capacity.saturating_add(capacity / 2);
    if amortized > required {
        Some(amortized)
    } else {
        Some(required)
    }
}
