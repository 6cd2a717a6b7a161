//! A 1-based, fully-closed interval consisting of a start and stop position
//! with an optional payload attached.
//!
//! ```text
//! ================ seq0 ===============
//!
//! | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -------------------------------------
//! |   |   | X | X | X | X | X |   |   |  <= 3-7
//! |   |   |   |   |   |   | X | X |   |  <= 7-8
//! ```
//!
//! Both bounds are included in the interval, so `3-7` covers five bases and
//! `7-8` shares the base at position 7 with it. Two intervals separated by
//! zero bases (e.g., `3-7` and `8-9`) are considered adjacent.
//!
//! The payload is opaque to every algorithm in this crate. It is carried
//! through untouched by [`merge_overlapping()`] (which discards it, as several
//! payloads collapse into one interval) and combined by [`intersect()`]
//! according to the [`Overlay`] policy.

use std::str::FromStr;

use omics::coordinate::position::Number;

pub mod intersect;
pub mod merge;
pub mod payload;

pub use intersect::intersect;
pub use merge::merge_overlapping;
pub use payload::Fields;
pub use payload::Overlay;
pub use payload::Value;

/// A genomic position.
pub type Position = Number;

/// The largest position an interval may stop at.
///
/// Stopping one short of `Position::MAX` leaves room for the half-open
/// bound one past the stop.
pub const MAX_POSITION: Position = Position::MAX - 1;

/// An error related to an interval.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The start position is greater than the stop position, which would
    /// result in a negative-length interval.
    StartGreaterThanStop(Position, Position),

    /// The stop position is greater than [`MAX_POSITION`].
    StopOutOfRange(Position),

    /// Could not parse an interval from the given value.
    ParseError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StartGreaterThanStop(start, stop) => write!(
                f,
                "start position ({start}) cannot be greater than the stop position ({stop})"
            ),
            Error::StopOutOfRange(stop) => write!(
                f,
                "stop position ({stop}) cannot be greater than the maximum position \
                 ({MAX_POSITION})"
            ),
            Error::ParseError(value) => {
                write!(f, "could not parse interval from the value: {value}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A fully-closed interval consisting of a start and stop position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interval<P = ()> {
    /// The first base covered by the interval.
    start: Position,

    /// The last base covered by the interval.
    stop: Position,

    /// The annotation values attached to the interval.
    payload: P,
}

impl Interval {
    /// Attempts to create a new [`Interval`] without a payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Error;
    /// use regionview::interval::Interval;
    ///
    /// let interval = Interval::try_new(3, 7)?;
    /// assert_eq!(interval.size(), 5);
    ///
    /// // A single base.
    /// let interval = Interval::try_new(7, 7)?;
    /// assert_eq!(interval.size(), 1);
    ///
    /// let err = Interval::try_new(7, 3).unwrap_err();
    /// assert_eq!(err, Error::StartGreaterThanStop(7, 3));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: Position, stop: Position) -> Result<Self> {
        Interval::try_with_payload(start, stop, ())
    }
}

impl<P> Interval<P> {
    /// Attempts to create a new [`Interval`] carrying `payload`.
    ///
    /// The stop position may not exceed [`MAX_POSITION`].
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Error;
    /// use regionview::interval::Interval;
    ///
    /// let interval = Interval::try_with_payload(10, 20, 0.5)?;
    /// assert_eq!(interval.payload(), &0.5);
    ///
    /// let err = Interval::try_with_payload(5, u64::MAX, 0.5).unwrap_err();
    /// assert_eq!(err, Error::StopOutOfRange(u64::MAX));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_with_payload(start: Position, stop: Position, payload: P) -> Result<Self> {
        if start > stop {
            return Err(Error::StartGreaterThanStop(start, stop));
        }

        if stop > MAX_POSITION {
            return Err(Error::StopOutOfRange(stop));
        }

        Ok(Self {
            start,
            stop,
            payload,
        })
    }

    /// Gets the start position of the interval.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the stop position of the interval.
    pub fn stop(&self) -> Position {
        self.stop
    }

    /// Gets the payload of the interval by reference.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes `self` and returns the payload of the interval.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Consumes `self` and returns the start position, stop position, and
    /// payload.
    pub fn into_parts(self) -> (Position, Position, P) {
        (self.start, self.stop, self.payload)
    }

    /// Gets the number of bases covered by the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    ///
    /// assert_eq!(Interval::try_new(1, 1)?.size(), 1);
    /// assert_eq!(Interval::try_new(1, 10)?.size(), 10);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn size(&self) -> Position {
        self.stop - self.start + 1
    }

    /// Indicates whether a position falls within the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    ///
    /// let interval = Interval::try_new(3, 7)?;
    ///
    /// assert!(interval.contains(3));
    /// assert!(interval.contains(7));
    ///
    /// assert!(!interval.contains(2));
    /// assert!(!interval.contains(8));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.stop
    }

    /// Strips the payload from the interval.
    pub fn bounds(&self) -> Interval {
        Interval {
            start: self.start,
            stop: self.stop,
            payload: (),
        }
    }

    /// Expands the interval by `padding` bases on either side, dropping the
    /// payload.
    ///
    /// The start never moves below position `1` (an interval that already
    /// starts at `0` keeps its start), and the stop never moves past
    /// [`MAX_POSITION`].
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    ///
    /// let interval = Interval::try_new(10, 20)?;
    /// assert_eq!(interval.expand(5), Interval::try_new(5, 25)?);
    /// assert_eq!(interval.expand(50), Interval::try_new(1, 70)?);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn expand(&self, padding: Position) -> Interval {
        let start = std::cmp::min(
            std::cmp::max(self.start.saturating_sub(padding), 1),
            self.start,
        );

        Interval {
            start,
            stop: std::cmp::min(self.stop.saturating_add(padding), MAX_POSITION),
            payload: (),
        }
    }

    /// Consumes `self` and replaces the payload using `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    ///
    /// let interval = Interval::try_with_payload(1, 5, 0.25)?;
    /// let interval = interval.map_payload(|value| value * 2.0);
    /// assert_eq!(interval.payload(), &0.5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn map_payload<Q, F>(self, f: F) -> Interval<Q>
    where
        F: FnOnce(P) -> Q,
    {
        Interval {
            start: self.start,
            stop: self.stop,
            payload: f(self.payload),
        }
    }
}

impl<P: Clone> Interval<P> {
    /// Clips the interval to the fully-closed window `[start, stop]`.
    ///
    /// - If the interval does not overlap the window, `None` is returned.
    /// - Otherwise, the overlapping portion (carrying a copy of the payload)
    ///   is returned wrapped in `Some`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    ///
    /// let interval = Interval::try_new(10, 20)?;
    ///
    /// assert_eq!(interval.clip(15, 30), Some(Interval::try_new(15, 20)?));
    /// assert_eq!(interval.clip(0, 100), Some(Interval::try_new(10, 20)?));
    /// assert_eq!(interval.clip(20, 20), Some(Interval::try_new(20, 20)?));
    /// assert_eq!(interval.clip(21, 30), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn clip(&self, start: Position, stop: Position) -> Option<Interval<P>> {
        let start = std::cmp::max(self.start, start);
        let stop = std::cmp::min(self.stop, stop);

        if start > stop {
            return None;
        }

        Some(Interval {
            start,
            stop,
            payload: self.payload.clone(),
        })
    }
}

impl<P> std::fmt::Display for Interval<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, stop) = match s.split_once('-') {
            Some((start, stop)) => (start, stop),
            None => (s, s),
        };

        let start = start
            .trim()
            .parse::<Position>()
            .map_err(|_| Error::ParseError(s.to_string()))?;
        let stop = stop
            .trim()
            .parse::<Position>()
            .map_err(|_| Error::ParseError(s.to_string()))?;

        Interval::try_new(start, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_it_creates_a_valid_interval() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let interval = Interval::try_new(1, 10)?;
        assert_eq!(interval.start(), 1);
        assert_eq!(interval.stop(), 10);
        assert_eq!(interval.size(), 10);

        Ok(())
    }

    #[test]
    fn test_it_rejects_a_negative_length_interval() {
        let err = Interval::try_with_payload(10, 9, "exon").unwrap_err();
        assert!(matches!(err, Error::StartGreaterThanStop(10, 9)));
    }

    #[test]
    fn test_it_rejects_a_stop_at_the_end_of_the_coordinate_space()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Interval::try_new(5, Position::MAX).unwrap_err();
        assert_eq!(err, Error::StopOutOfRange(Position::MAX));

        let interval = Interval::try_new(0, MAX_POSITION)?;
        assert_eq!(interval.size(), Position::MAX);
        assert_eq!(interval.expand(10).stop(), MAX_POSITION);

        Ok(())
    }

    #[test]
    fn test_clipping_keeps_the_payload() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let interval = Interval::try_with_payload(100, 200, String::from("CDS"))?;
        let clipped = interval.clip(150, 250).unwrap();

        assert_eq!(clipped.start(), 150);
        assert_eq!(clipped.stop(), 200);
        assert_eq!(clipped.payload(), "CDS");

        Ok(())
    }

    #[test]
    fn test_parsing_intervals() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("3-7".parse::<Interval>()?, Interval::try_new(3, 7)?);
        assert_eq!("42".parse::<Interval>()?, Interval::try_new(42, 42)?);

        let err = "7-3".parse::<Interval>().unwrap_err();
        assert!(matches!(err, Error::StartGreaterThanStop(7, 3)));

        let err = "a-3".parse::<Interval>().unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));

        let err = "3-".parse::<Interval>().unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));

        Ok(())
    }

    #[test]
    fn test_interval_to_string() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Interval::try_new(3, 7)?.to_string(), "3-7");
        assert_eq!(Interval::try_with_payload(1, 1, 0.3)?.to_string(), "1-1");

        Ok(())
    }
}
