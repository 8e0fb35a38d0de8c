//! Clamp values into a range.

use crate::options::Bound;

/// Clamp every value into `[less_than, greater_than]`.
///
/// Values above `greater_than` become `greater_than` and values below
/// `less_than` become `less_than`, unless `replacement` is given, in which
/// case out-of-range values become `replacement`. Exact values in the bound
/// are ignored.
pub fn cap(rolls: Vec<i64>, bound: &Bound, replacement: Option<i64>) -> Vec<i64> {
    rolls
        .into_iter()
        .map(|value| cap_value(value, bound, replacement))
        .collect()
}

fn cap_value(value: i64, bound: &Bound, replacement: Option<i64>) -> i64 {
    if let Some(gt) = bound.greater_than
        && value > gt
    {
        return replacement.unwrap_or(gt);
    }
    if let Some(lt) = bound.less_than
        && value < lt
    {
        return replacement.unwrap_or(lt);
    }
    value
}
