//! N-way intersection of interval lists.
//!
//! The algorithm keeps one cursor per list. At each step, it looks at the
//! interval under every cursor and computes the largest start and the
//! smallest stop among them. When the largest start is strictly less than
//! the smallest stop, a fragment spanning `[max start, min stop]` is emitted.
//! Every cursor whose interval stops at the smallest stop is then advanced.
//! The loop ends as soon as any cursor runs off the end of its list.
//!
//! ```text
//! | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -------------------------------------
//! |   | A | A | A |   | A | A | A |   |
//! | B | B | B |   |   |   |   |   |   |
//! |   |   | B | B | B |   |   |   |   |
//! |   |   |   |   | B | B | B | B | B |
//! -------------------------------------
//! |   | X | X |   |   |   |   |   |   |  <= 2-3
//! |   |   | X | X |   |   |   |   |   |  <= 3-4
//! |   |   |   |   |   | X | X | X |   |  <= 6-8
//! ```
//!
//! Because a fragment requires `max start < min stop`, overlaps of a single
//! base are not reported.

use tracing::debug;

use crate::interval::Interval;
use crate::interval::Overlay;
use crate::interval::Position;

/// An error related to intersecting interval lists.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// An interval list contains intervals that overlap each other by more
    /// than a shared endpoint.
    OverlappingIntervals {
        /// The index of the offending list.
        list: usize,

        /// The stop position of the earlier interval.
        previous_stop: Position,

        /// The start position of the later interval.
        start: Position,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OverlappingIntervals {
                list,
                previous_stop,
                start,
            } => write!(
                f,
                "interval list {list} overlaps itself: an interval starts at {start} before the \
                 previous interval stops at {previous_stop}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Sorts a single list by start position and checks that it does not overlap
/// itself.
fn sort_and_validate<P>(index: usize, list: &[Interval<P>]) -> Result<Vec<&Interval<P>>> {
    let mut sorted = list.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|interval| (interval.start(), interval.stop()));

    for pair in sorted.windows(2) {
        if pair[1].start() < pair[0].stop() {
            return Err(Error::OverlappingIntervals {
                list: index,
                previous_stop: pair[0].stop(),
                start: pair[1].start(),
            });
        }
    }

    Ok(sorted)
}

/// Intersects an arbitrary number of interval lists.
///
/// Each list is sorted by start (and then stop) position before
/// intersecting, so the input order does not matter. A list must not overlap
/// itself, although two of its intervals may share an endpoint base (e.g.,
/// `1-3` and `3-5`); otherwise,
/// [`Error::OverlappingIntervals`] is returned. Merging the list with
/// [`merge_overlapping()`](crate::interval::merge_overlapping) beforehand
/// always satisfies this requirement.
///
/// The payload of each fragment starts from `P::default()` and is overlaid
/// with the payload of the current interval of every list, in list order.
/// Thus, on a collision, the value from the later list wins.
///
/// Intersecting zero lists, or any empty list, returns an empty result.
///
/// # Examples
///
/// ```
/// use regionview::interval::Interval;
/// use regionview::interval::intersect;
///
/// let a = vec![Interval::try_new(2, 4)?, Interval::try_new(6, 8)?];
/// let b = vec![Interval::try_new(1, 3)?, Interval::try_new(3, 5)?, Interval::try_new(5, 9)?];
///
/// assert_eq!(
///     intersect(&[a, b])?,
///     vec![
///         Interval::try_new(2, 3)?,
///         Interval::try_new(3, 4)?,
///         Interval::try_new(6, 8)?,
///     ]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn intersect<P>(lists: &[Vec<Interval<P>>]) -> Result<Vec<Interval<P>>>
where
    P: Overlay + Default,
{
    if lists.is_empty() || lists.iter().any(|list| list.is_empty()) {
        return Ok(Vec::new());
    }

    let sorted = lists
        .iter()
        .enumerate()
        .map(|(index, list)| sort_and_validate(index, list))
        .collect::<Result<Vec<_>>>()?;

    let mut cursors = vec![0usize; sorted.len()];
    let mut fragments = Vec::new();

    'outer: loop {
        let current = cursors
            .iter()
            .zip(sorted.iter())
            .map(|(cursor, list)| list[*cursor])
            .collect::<Vec<_>>();

        let max_start = current
            .iter()
            .map(|interval| interval.start())
            .fold(Position::MIN, std::cmp::max);
        let min_stop = current
            .iter()
            .map(|interval| interval.stop())
            .fold(Position::MAX, std::cmp::min);

        if max_start < min_stop {
            let mut payload = P::default();

            for interval in &current {
                payload.overlay(interval.payload());
            }

            fragments.push(Interval {
                start: max_start,
                stop: min_stop,
                payload,
            });
        }

        for ((cursor, list), interval) in cursors.iter_mut().zip(sorted.iter()).zip(current) {
            if interval.stop() == min_stop {
                *cursor += 1;

                if *cursor >= list.len() {
                    break 'outer;
                }
            }
        }
    }

    debug!(
        lists = lists.len(),
        fragments = fragments.len(),
        "intersected interval lists"
    );

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Fields;
    use crate::interval::Value;

    fn intervals(bounds: &[(Position, Position)]) -> Vec<Interval> {
        bounds
            .iter()
            .map(|(start, stop)| Interval::try_new(*start, *stop).unwrap())
            .collect()
    }

    fn annotated(bounds: &[(Position, Position)], key: &str, value: &str) -> Vec<Interval<Fields>> {
        bounds
            .iter()
            .map(|(start, stop)| {
                let fields = Fields::from([
                    (String::from(key), Value::from(value)),
                    (String::from("source"), Value::from(value)),
                ]);
                Interval::try_with_payload(*start, *stop, fields).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_each_fragment_is_bounded_by_the_tighter_input()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = intervals(&[(2, 4), (6, 8)]);
        let b = intervals(&[(2, 6), (6, 9)]);
        assert_eq!(intersect(&[a, b])?, intervals(&[(2, 4), (6, 8)]));

        let a = intervals(&[(2, 4), (6, 8)]);
        let b = intervals(&[(1, 8)]);
        assert_eq!(intersect(&[a, b])?, intervals(&[(2, 4), (6, 8)]));

        let a = intervals(&[(2, 4), (6, 8)]);
        let b = intervals(&[(1, 3), (3, 5), (5, 9)]);
        assert_eq!(intersect(&[a, b])?, intervals(&[(2, 3), (3, 4), (6, 8)]));

        Ok(())
    }

    #[test]
    fn test_unsorted_input_is_sorted_first()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = intervals(&[(6, 8), (2, 4)]);
        let b = intervals(&[(5, 9), (1, 3), (3, 5)]);
        assert_eq!(intersect(&[a, b])?, intervals(&[(2, 3), (3, 4), (6, 8)]));

        Ok(())
    }

    #[test]
    fn test_empty_inputs_produce_empty_output()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let lists: Vec<Vec<Interval>> = Vec::new();
        assert!(intersect(&lists)?.is_empty());

        let a = intervals(&[(1, 10)]);
        assert!(intersect(&[a, Vec::new()])?.is_empty());

        Ok(())
    }

    #[test]
    fn test_intersecting_a_single_list_returns_it()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = intervals(&[(1, 10), (20, 30)]);
        assert_eq!(intersect(&[a.clone()])?, a);

        Ok(())
    }

    #[test]
    fn test_three_way_intersection() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = intervals(&[(1, 100)]);
        let b = intervals(&[(10, 50), (60, 90)]);
        let c = intervals(&[(40, 70)]);
        assert_eq!(intersect(&[a, b, c])?, intervals(&[(40, 50), (60, 70)]));

        Ok(())
    }

    #[test]
    fn test_it_rejects_self_overlapping_lists() {
        let a = intervals(&[(1, 10)]);
        let b = intervals(&[(1, 5), (4, 8)]);

        let err = intersect(&[a, b]).unwrap_err();
        assert_eq!(
            err,
            Error::OverlappingIntervals {
                list: 1,
                previous_stop: 5,
                start: 4
            }
        );
    }

    #[test]
    fn test_intervals_sharing_a_start_are_accepted_in_any_order()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let window = intervals(&[(1, 20)]);

        let forward = intersect(&[window.clone(), intervals(&[(10, 10), (10, 15)])])?;
        let reverse = intersect(&[window, intervals(&[(10, 15), (10, 10)])])?;

        assert_eq!(forward, intervals(&[(10, 15)]));
        assert_eq!(reverse, forward);

        Ok(())
    }

    #[test]
    fn test_later_lists_win_field_collisions()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let constraint = annotated(&[(1, 10)], "obs_exp", "low");
        let exons = annotated(&[(3, 6)], "feature_type", "CDS");

        let fragments = intersect(&[constraint.clone(), exons.clone()])?;
        assert_eq!(fragments.len(), 1);

        let fields = fragments[0].payload();
        assert_eq!(fields["obs_exp"], Value::from("low"));
        assert_eq!(fields["feature_type"], Value::from("CDS"));
        assert_eq!(fields["source"], Value::from("CDS"));

        let fragments = intersect(&[exons, constraint])?;
        assert_eq!(fragments[0].payload()["source"], Value::from("low"));

        Ok(())
    }

    #[test]
    fn test_intersection_bounds_are_commutative()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = annotated(&[(2, 4), (6, 8), (12, 40)], "a", "a");
        let b = annotated(&[(1, 3), (3, 5), (5, 9), (20, 25)], "b", "b");

        let ab = intersect(&[a.clone(), b.clone()])?
            .iter()
            .map(|interval| interval.bounds())
            .collect::<Vec<_>>();
        let ba = intersect(&[b, a])?
            .iter()
            .map(|interval| interval.bounds())
            .collect::<Vec<_>>();

        assert_eq!(ab, ba);

        Ok(())
    }
}
