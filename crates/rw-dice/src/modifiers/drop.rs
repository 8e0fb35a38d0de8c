//! Remove dice by value or by rank.

use crate::options::DropSpec;

/// Remove values matching the bound, then the `highest` and `lowest` ranked
/// survivors.
///
/// Ties between equal values go to the later die for `highest` and the
/// earlier die for `lowest`. When only `lowest` is requested the survivors
/// come back sorted ascending; otherwise they keep their rolled order.
pub fn drop(rolls: Vec<i64>, spec: &DropSpec) -> Vec<i64> {
    let survivors: Vec<i64> = rolls
        .into_iter()
        .filter(|value| !spec.bound.matches(*value))
        .collect();
    let mut dropped = vec![false; survivors.len()];

    if let Some(n) = spec.highest {
        let mut ranked: Vec<(usize, i64)> = survivors.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        mark(&mut dropped, &ranked, n);
    }
    if let Some(n) = spec.lowest {
        let mut ranked: Vec<(usize, i64)> = survivors.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        mark(&mut dropped, &ranked, n);
    }

    let mut kept: Vec<i64> = survivors
        .into_iter()
        .zip(dropped)
        .filter_map(|(value, dropped)| (!dropped).then_some(value))
        .collect();
    if spec.lowest.is_some() && spec.highest.is_none() {
        kept.sort_unstable();
    }
    kept
}

/// Mark the first `n` not-yet-dropped entries of `ranked`.
fn mark(dropped: &mut [bool], ranked: &[(usize, i64)], n: u32) {
    let picked: Vec<usize> = ranked
        .iter()
        .filter(|(idx, _)| !dropped[*idx])
        .take(n as usize)
        .map(|(idx, _)| *idx)
        .collect();
    for idx in picked {
        dropped[idx] = true;
    }
}
