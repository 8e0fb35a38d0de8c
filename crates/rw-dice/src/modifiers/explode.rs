//! Exploding dice.

use crate::dice::DieSource;

/// Append one fresh roll for every value equal to `sides`.
///
/// Single pass: the extra rolls never explode themselves.
pub fn explode(rolls: Vec<i64>, sides: u32, source: &mut dyn DieSource) -> Vec<i64> {
    let max = i64::from(sides);
    let extra = rolls.iter().filter(|&&value| value == max).count();
    let mut rolls = rolls;
    rolls.extend((0..extra).map(|_| source.roll_die(sides)));
    rolls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;

    #[test]
    fn one_extra_roll_per_max_face() {
        let mut source = ScriptedSource::new([6, 3]);
        assert_eq!(
            explode(vec![6, 2, 6], 6, &mut source),
            vec![6, 2, 6, 6, 3]
        );
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn no_max_face_no_rolls() {
        let mut source = ScriptedSource::new([1]);
        assert_eq!(explode(vec![1, 2], 6, &mut source), vec![1, 2]);
        assert_eq!(source.calls(), 0);
    }
}
