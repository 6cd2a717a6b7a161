//! Compression of per-region signal into flat segments.
//!
//! Dense signal tracks, such as the proportion expressed across transcripts
//! (pext) of each region of a gene, often change by amounts too small to
//! see. Rounding each value and merging the runs that round to the same value
//! leaves far fewer regions to draw without changing what is drawn.

use tracing::debug;

use crate::interval::Interval;
use crate::interval::Position;

/// The number of decimal places values are rounded to by default.
pub const DEFAULT_PRECISION: u8 = 1;

/// An error related to merging signal regions.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The region at the given index starts before the region preceding it.
    Unsorted {
        /// The index of the offending region.
        index: usize,
    },

    /// The value of the region at the given index is not a finite number.
    NonFiniteValue {
        /// The index of the offending region.
        index: usize,
    },

    /// The value of the region at the given index cannot be rounded to the
    /// requested number of decimal places without overflowing.
    PrecisionTooLarge {
        /// The index of the offending region.
        index: usize,

        /// The requested number of decimal places.
        decimals: u8,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unsorted { index } => write!(
                f,
                "regions must be sorted by start position: region {index} starts before region {}",
                index - 1
            ),
            Error::NonFiniteValue { index } => {
                write!(f, "region {index} does not have a finite value")
            }
            Error::PrecisionTooLarge { index, decimals } => write!(
                f,
                "the value of region {index} cannot be rounded to {decimals} decimal places"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A run of merged regions that is still being extended.
struct Segment {
    /// The first base of the segment.
    start: Position,

    /// The last base of the segment.
    stop: Position,

    /// The rounded value of the segment, scaled to an integer.
    key: i64,
}

/// Merges adjacent or overlapping regions whose values round to the same
/// value at [`DEFAULT_PRECISION`] decimal places.
///
/// # Examples
///
/// ```
/// use regionview::interval::Interval;
/// use regionview::signal::merge_by_similar_value;
///
/// let pext = vec![
///     Interval::try_with_payload(1, 10, 0.81)?,
///     Interval::try_with_payload(11, 20, 0.79)?,
///     Interval::try_with_payload(21, 30, 0.2)?,
///     // Not adjacent to the previous region.
///     Interval::try_with_payload(40, 50, 0.2)?,
/// ];
///
/// assert_eq!(
///     merge_by_similar_value(&pext)?,
///     vec![
///         Interval::try_with_payload(1, 20, 0.8)?,
///         Interval::try_with_payload(21, 30, 0.2)?,
///         Interval::try_with_payload(40, 50, 0.2)?,
///     ]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn merge_by_similar_value(regions: &[Interval<f64>]) -> Result<Vec<Interval<f64>>> {
    merge_by_similar_value_with_precision(regions, DEFAULT_PRECISION)
}

/// Merges adjacent or overlapping regions whose values round to the same
/// value at `decimals` decimal places.
///
/// The regions must be sorted by start position. Each returned region
/// carries the rounded value shared by the regions merged into it.
///
/// A value scaled by `10^decimals` must fit in an [`i64`], otherwise
/// [`Error::PrecisionTooLarge`] is returned.
pub fn merge_by_similar_value_with_precision(
    regions: &[Interval<f64>],
    decimals: u8,
) -> Result<Vec<Interval<f64>>> {
    let factor = 10f64.powi(i32::from(decimals));
    let mut segments = Vec::<Segment>::new();

    for (index, region) in regions.iter().enumerate() {
        let value = *region.payload();

        if !value.is_finite() {
            return Err(Error::NonFiniteValue { index });
        }

        if index > 0 && region.start() < regions[index - 1].start() {
            return Err(Error::Unsorted { index });
        }

        // Rounded values are compared as scaled integers.
        let scaled = (value * factor).round();

        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(Error::PrecisionTooLarge { index, decimals });
        }

        let key = scaled as i64;

        match segments.last_mut() {
            Some(current)
                if current.key == key && region.start() <= current.stop.saturating_add(1) =>
            {
                current.stop = std::cmp::max(current.stop, region.stop());
            }
            _ => segments.push(Segment {
                start: region.start(),
                stop: region.stop(),
                key,
            }),
        }
    }

    debug!(
        regions = regions.len(),
        segments = segments.len(),
        decimals,
        "merged regions by similar value"
    );

    Ok(segments
        .into_iter()
        .map(|segment| {
            // SAFETY: a segment starts as a valid region and its stop only
            // ever grows.
            Interval::try_with_payload(segment.start, segment.stop, segment.key as f64 / factor)
                .unwrap()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(values: &[(Position, Position, f64)]) -> Vec<Interval<f64>> {
        values
            .iter()
            .map(|(start, stop, value)| Interval::try_with_payload(*start, *stop, *value).unwrap())
            .collect()
    }

    #[test]
    fn test_an_empty_signal_merges_to_nothing()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert!(merge_by_similar_value(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_a_single_change_breaks_the_run()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let signal = regions(&[
            (1, 1, 0.5),
            (2, 2, 0.5),
            (3, 3, 0.5),
            (4, 4, 0.9),
            (5, 5, 0.5),
            (6, 6, 0.5),
        ]);

        assert_eq!(
            merge_by_similar_value(&signal)?,
            regions(&[(1, 3, 0.5), (4, 4, 0.9), (5, 6, 0.5)])
        );

        Ok(())
    }

    #[test]
    fn test_constant_signal_collapses_to_one_region()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let signal = (1..=100)
            .map(|i| Interval::try_with_payload(i, i, 0.31 + (i % 3) as f64 * 0.01))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        assert_eq!(
            merge_by_similar_value(&signal)?,
            regions(&[(1, 100, 0.3)])
        );

        Ok(())
    }

    #[test]
    fn test_precision_is_configurable() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let signal = regions(&[(1, 5, 0.81), (6, 10, 0.79)]);

        assert_eq!(
            merge_by_similar_value_with_precision(&signal, 2)?,
            regions(&[(1, 5, 0.81), (6, 10, 0.79)])
        );
        assert_eq!(
            merge_by_similar_value_with_precision(&signal, 0)?,
            regions(&[(1, 10, 1.0)])
        );

        Ok(())
    }

    #[test]
    fn test_overlapping_regions_with_the_same_value_merge()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let signal = regions(&[(1, 10, 0.4), (5, 8, 0.4), (9, 12, 0.4)]);
        assert_eq!(merge_by_similar_value(&signal)?, regions(&[(1, 12, 0.4)]));

        Ok(())
    }

    #[test]
    fn test_overflowing_precision_is_rejected()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let signal = regions(&[(1, 5, 0.5), (6, 10, 0.9)]);

        assert_eq!(
            merge_by_similar_value_with_precision(&signal, 20),
            Err(Error::PrecisionTooLarge {
                index: 0,
                decimals: 20
            })
        );
        assert_eq!(
            merge_by_similar_value_with_precision(&signal, u8::MAX),
            Err(Error::PrecisionTooLarge {
                index: 0,
                decimals: u8::MAX
            })
        );

        // A precision that fits still keeps distinct values apart.
        assert_eq!(
            merge_by_similar_value_with_precision(&signal, 15)?,
            regions(&[(1, 5, 0.5), (6, 10, 0.9)])
        );

        Ok(())
    }

    #[test]
    fn test_unsorted_signal_is_rejected() {
        let signal = regions(&[(10, 20, 0.1), (1, 5, 0.1)]);
        assert_eq!(
            merge_by_similar_value(&signal),
            Err(Error::Unsorted { index: 1 })
        );
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let signal = regions(&[(1, 5, 0.1), (6, 10, f64::NAN)]);
        assert_eq!(
            merge_by_similar_value(&signal),
            Err(Error::NonFiniteValue { index: 1 })
        );
    }
}
