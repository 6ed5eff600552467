//! Shift sequencing

/// Position of `order_id` within its shift, starting at 1
///
/// Counts the shift's orders with an id at or below `order_id`. The order
/// itself always counts once, even when the caller's list omits it.
pub fn sequence_in_shift(shift_order_ids: &[i64], order_id: i64) -> u32 {
    let earlier = shift_order_ids
        .iter()
        .filter(|&&id| id < order_id)
        .count();
    u32::try_from(earlier + 1).unwrap_or(u32::MAX)
}
