//! Merging of adjacent or overlapping intervals.

use tracing::trace;

use crate::interval::Interval;

/// Merges every adjacent or overlapping interval in `intervals`.
///
/// The intervals are first sorted by their start position (stably, so the
/// input order is preserved for equal starts). A single scan then extends the
/// current merged interval whenever the next interval starts at or before
/// the base immediately following the current stop. Intervals separated by
/// zero bases are therefore merged.
///
/// The returned intervals are sorted, non-overlapping, and non-adjacent, and
/// every base covered by the input is covered by exactly one of them. The
/// payloads are discarded.
///
/// # Examples
///
/// ```
/// use regionview::interval::Interval;
/// use regionview::interval::merge_overlapping;
///
/// let intervals = vec![
///     Interval::try_new(10, 20)?,
///     Interval::try_new(1, 5)?,
///     // Adjacent to `1-5`.
///     Interval::try_new(6, 8)?,
///     Interval::try_new(15, 30)?,
/// ];
///
/// assert_eq!(
///     merge_overlapping(&intervals),
///     vec![Interval::try_new(1, 8)?, Interval::try_new(10, 30)?]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn merge_overlapping<P>(intervals: &[Interval<P>]) -> Vec<Interval> {
    let mut sorted = intervals.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|interval| interval.start());

    let mut merged = Vec::<Interval>::with_capacity(sorted.len());

    for interval in sorted {
        match merged.last_mut() {
            Some(current) if interval.start() <= current.stop.saturating_add(1) => {
                current.stop = std::cmp::max(current.stop, interval.stop());
            }
            _ => merged.push(interval.bounds()),
        }
    }

    trace!(
        input = intervals.len(),
        output = merged.len(),
        "merged overlapping intervals"
    );

    merged
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::Rng as _;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;
    use crate::interval::Position;

    fn random_intervals(rng: &mut StdRng) -> Vec<Interval> {
        let n = rng.gen_range(0..25);
        (0..n)
            .map(|_| {
                let start = rng.gen_range(1..200);
                let stop = start + rng.gen_range(0..15);
                Interval::try_new(start, stop).unwrap()
            })
            .collect()
    }

    fn covered_bases(intervals: &[Interval]) -> BTreeSet<Position> {
        intervals
            .iter()
            .flat_map(|interval| interval.start()..=interval.stop())
            .collect()
    }

    #[test]
    fn test_empty_input_returns_empty_output() {
        let intervals: Vec<Interval> = Vec::new();
        assert!(merge_overlapping(&intervals).is_empty());
    }

    #[test]
    fn test_single_input_returns_a_copy() -> Result<(), Box<dyn std::error::Error>> {
        let intervals = vec![Interval::try_with_payload(5, 9, "exon")?];
        assert_eq!(merge_overlapping(&intervals), vec![Interval::try_new(5, 9)?]);

        Ok(())
    }

    #[test]
    fn test_adjacent_intervals_merge_but_gapped_intervals_do_not()
    -> Result<(), Box<dyn std::error::Error>> {
        let intervals = vec![Interval::try_new(1, 3)?, Interval::try_new(4, 6)?];
        assert_eq!(merge_overlapping(&intervals), vec![Interval::try_new(1, 6)?]);

        let intervals = vec![Interval::try_new(1, 3)?, Interval::try_new(5, 6)?];
        assert_eq!(
            merge_overlapping(&intervals),
            vec![Interval::try_new(1, 3)?, Interval::try_new(5, 6)?]
        );

        Ok(())
    }

    #[test]
    fn test_contained_intervals_do_not_shrink_the_merge()
    -> Result<(), Box<dyn std::error::Error>> {
        let intervals = vec![
            Interval::try_new(1, 100)?,
            Interval::try_new(10, 20)?,
            Interval::try_new(50, 60)?,
        ];
        assert_eq!(merge_overlapping(&intervals), vec![Interval::try_new(1, 100)?]);

        Ok(())
    }

    #[test]
    fn test_merging_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let intervals = random_intervals(&mut rng);
            let once = merge_overlapping(&intervals);
            let twice = merge_overlapping(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_merging_conserves_coverage() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let intervals = random_intervals(&mut rng);
            let merged = merge_overlapping(&intervals);

            assert_eq!(covered_bases(&intervals), covered_bases(&merged));

            for pair in merged.windows(2) {
                assert!(pair[0].stop() + 1 < pair[1].start());
            }
        }
    }
}
