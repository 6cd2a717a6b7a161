//! Mapping genomic positions onto pixel offsets.
//!
//! A [`Scale`] spreads the bases of a [`Domain`] evenly across a pixel range.
//! Positions that fall between two domain intervals (e.g., within an intron
//! that is not part of the domain) occupy zero pixels, which is what lets an
//! exon-only view pack the coding sequence densely.
//!
//! ```text
//! domain:  [1 ---- 10]        [21 ---- 30]
//! bases:    1 2 ... 10  11-20  21 ... 30
//! pixels:  |----------|       |----------|
//!          0         50       50        100
//! ```
//!
//! Each base occupies `(hi - lo) / size` pixels. [`Scale::position()`] returns
//! the right edge of a base's span, while [`Scale::base_start()`] returns its
//! left edge.

use tracing::trace;

use crate::interval::Interval;
use crate::interval::Position;

pub mod builder;
pub mod domain;

pub use builder::Builder;
pub use domain::Domain;

/// The tolerance used when inverting pixel offsets back to bases.
const INVERT_EPSILON: f64 = 1e-9;

/// An error related to a [`Scale`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// A domain error.
    Domain(domain::Error),

    /// The pixel range contains a non-finite value.
    InvalidPixelRange(f64, f64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Domain(err) => write!(f, "domain error: {err}"),
            Error::InvalidPixelRange(lo, hi) => {
                write!(f, "invalid pixel range: [{lo}, {hi}]")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A mapping from genomic positions within a [`Domain`] to pixel offsets.
#[derive(Clone, Debug)]
pub struct Scale {
    /// The domain being mapped.
    domain: Domain,

    /// The pixel offset of the first base's left edge.
    lo: f64,

    /// The pixel offset of the last base's right edge.
    hi: f64,

    /// The domain intervals, indexable for binary searches.
    intervals: Vec<Interval>,

    /// The cumulative number of bases through the end of each domain
    /// interval.
    ends: Vec<Position>,
}

impl Scale {
    /// Attempts to create a new [`Scale`] mapping `domain` onto the pixel
    /// range `[lo, hi]`.
    ///
    /// The range may be reversed (`hi < lo`), in which case offsets decrease
    /// as positions increase.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    /// use regionview::scale::Scale;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(1, 10)?])?;
    /// let scale = Scale::try_new(domain, 0.0, 100.0)?;
    ///
    /// assert_eq!(scale.position(5), 50.0);
    /// assert_eq!(scale.position(10), 100.0);
    ///
    /// assert!(Scale::try_new(scale.domain().clone(), 0.0, f64::NAN).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(domain: Domain, lo: f64, hi: f64) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(Error::InvalidPixelRange(lo, hi));
        }

        let intervals = domain.intervals().iter().cloned().collect::<Vec<_>>();
        let ends = intervals
            .iter()
            .scan(0, |total, interval| {
                *total += interval.size();
                Some(*total)
            })
            .collect::<Vec<_>>();

        Ok(Self {
            domain,
            lo,
            hi,
            intervals,
            ends,
        })
    }

    /// Gets the domain of the scale.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Gets the pixel range of the scale.
    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// Gets the total number of bases in the domain.
    pub fn size(&self) -> Position {
        // SAFETY: a domain always contains at least one interval.
        *self.ends.last().unwrap()
    }

    /// Gets the (signed) number of pixels occupied by each base.
    pub fn pixels_per_base(&self) -> f64 {
        (self.hi - self.lo) / self.size() as f64
    }

    /// Counts the domain bases at or before `position`.
    fn bases_through(&self, position: Position) -> Position {
        // The number of domain intervals that stop before the position.
        let index = self
            .intervals
            .partition_point(|interval| interval.stop() < position);
        let before = if index == 0 { 0 } else { self.ends[index - 1] };

        match self.intervals.get(index) {
            Some(interval) if interval.start() <= position => {
                before + (position - interval.start() + 1)
            }
            _ => before,
        }
    }

    /// Counts the domain bases strictly before `position`.
    fn bases_before(&self, position: Position) -> Position {
        match position.checked_sub(1) {
            Some(previous) => self.bases_through(previous),
            None => 0,
        }
    }

    /// Converts a number of bases into a pixel offset.
    fn offset(&self, bases: Position) -> f64 {
        self.lo + (self.hi - self.lo) * bases as f64 / self.size() as f64
    }

    /// Maps a genomic position to a pixel offset (the right edge of the base
    /// at `position`).
    ///
    /// The offset grows monotonically with the position. A position within a
    /// gap between domain intervals maps to the end of the preceding
    /// interval. A position before the domain maps to `lo`, and a position
    /// after the domain maps to `hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    /// use regionview::scale::Scale;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(1, 10)?, Interval::try_new(21, 30)?])?;
    /// let scale = Scale::try_new(domain, 0.0, 100.0)?;
    ///
    /// assert_eq!(scale.position(10), 50.0);
    /// // Within the gap.
    /// assert_eq!(scale.position(15), 50.0);
    /// assert_eq!(scale.position(21), 55.0);
    /// assert_eq!(scale.position(30), 100.0);
    ///
    /// // Outside of the domain.
    /// assert_eq!(scale.position(0), 0.0);
    /// assert_eq!(scale.position(1000), 100.0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn position(&self, position: Position) -> f64 {
        if position < self.domain.start() || position > self.domain.stop() {
            trace!(position, "clamping position outside of the domain");
        }

        self.offset(self.bases_through(position))
    }

    /// Maps a genomic position to the pixel offset of the left edge of the
    /// base at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    /// use regionview::scale::Scale;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(1, 10)?])?;
    /// let scale = Scale::try_new(domain, 0.0, 100.0)?;
    ///
    /// assert_eq!(scale.base_start(1), 0.0);
    /// assert_eq!(scale.base_start(10), 90.0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn base_start(&self, position: Position) -> f64 {
        self.offset(self.bases_before(position))
    }

    /// Maps a pixel offset back to the domain base whose span contains it.
    ///
    /// Offsets outside of the pixel range are clamped to the first or last
    /// base in the domain. A pixel offset that sits exactly on the boundary
    /// between two bases resolves to the earlier base.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    /// use regionview::scale::Scale;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(1, 10)?, Interval::try_new(21, 30)?])?;
    /// let scale = Scale::try_new(domain, 0.0, 100.0)?;
    ///
    /// assert_eq!(scale.invert(0.0), 1);
    /// assert_eq!(scale.invert(52.0), 21);
    /// assert_eq!(scale.invert(100.0), 30);
    /// assert_eq!(scale.invert(-10.0), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn invert(&self, pixel: f64) -> Position {
        let size = self.size();

        let fraction = if self.hi == self.lo {
            0.0
        } else {
            ((pixel - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)
        };

        // The 1-based index of the base within the domain.
        let target = ((fraction * size as f64) - INVERT_EPSILON).ceil() as Position;
        let target = target.clamp(1, size);

        let index = self.ends.partition_point(|end| *end < target);
        let before = if index == 0 { 0 } else { self.ends[index - 1] };

        self.intervals[index].start() + (target - before - 1)
    }
}
