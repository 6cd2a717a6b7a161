//! The genomic domain of a track.
//!
//! A domain is the subset of genomic positions visible in a track (e.g., the
//! coding exons of a gene, each padded by some number of bases). Its
//! intervals are always sorted and non-overlapping, and a domain always
//! covers at least one base.

use nonempty::NonEmpty;
use tracing::debug;

use crate::interval::Interval;
use crate::interval::Position;
use crate::interval::merge_overlapping;

/// An error related to a [`Domain`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The domain does not cover any bases.
    EmptyDomain,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyDomain => write!(f, "the domain does not cover any bases"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The set of genomic positions visible in a track.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Domain {
    /// The sorted, non-overlapping intervals in the domain.
    intervals: NonEmpty<Interval>,
}

impl Domain {
    /// Attempts to create a new [`Domain`] from a list of regions.
    ///
    /// The regions are merged with
    /// [`merge_overlapping()`](crate::interval::merge_overlapping), so they
    /// may be provided in any order and may overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    /// use regionview::scale::domain::Error;
    ///
    /// let domain = Domain::try_new(&[
    ///     Interval::try_new(30, 40)?,
    ///     Interval::try_new(1, 10)?,
    ///     Interval::try_new(5, 15)?,
    /// ])?;
    ///
    /// assert_eq!(domain.intervals().len(), 2);
    /// assert_eq!(domain.size(), 26);
    ///
    /// let regions: Vec<Interval> = Vec::new();
    /// assert_eq!(Domain::try_new(&regions), Err(Error::EmptyDomain));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new<P>(regions: &[Interval<P>]) -> Result<Self> {
        let intervals = NonEmpty::from_vec(merge_overlapping(regions)).ok_or(Error::EmptyDomain)?;
        Ok(Self { intervals })
    }

    /// Attempts to create a new [`Domain`] from a list of regions, expanding
    /// each region by `padding` bases on either side before merging.
    ///
    /// Padding never extends a region below position `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    ///
    /// let exons = [Interval::try_new(10, 20)?, Interval::try_new(40, 50)?];
    ///
    /// let domain = Domain::try_padded(&exons, 5)?;
    /// assert_eq!(
    ///     domain.intervals().iter().cloned().collect::<Vec<_>>(),
    ///     vec![Interval::try_new(5, 25)?, Interval::try_new(35, 55)?]
    /// );
    ///
    /// // Enough padding closes the intron entirely.
    /// let domain = Domain::try_padded(&exons, 10)?;
    /// assert_eq!(domain.intervals().len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_padded<P>(regions: &[Interval<P>], padding: Position) -> Result<Self> {
        let padded = regions
            .iter()
            .map(|region| region.expand(padding))
            .collect::<Vec<_>>();

        Domain::try_new(&padded)
    }

    /// Gets the intervals in the domain.
    pub fn intervals(&self) -> &NonEmpty<Interval> {
        &self.intervals
    }

    /// Gets the first position in the domain.
    pub fn start(&self) -> Position {
        self.intervals.first().start()
    }

    /// Gets the last position in the domain.
    pub fn stop(&self) -> Position {
        self.intervals.last().stop()
    }

    /// Gets the total number of bases covered by the domain.
    pub fn size(&self) -> Position {
        self.intervals.iter().map(|interval| interval.size()).sum()
    }

    /// Indicates whether a position falls within one of the domain's
    /// intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(1, 10)?, Interval::try_new(21, 30)?])?;
    ///
    /// assert!(domain.contains(10));
    /// assert!(domain.contains(21));
    /// assert!(!domain.contains(15));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn contains(&self, position: Position) -> bool {
        self.intervals
            .iter()
            .any(|interval| interval.contains(position))
    }

    /// Restricts the domain to the fully-closed window `[start, stop]`.
    ///
    /// This is what happens when a user zooms into a region of a track: the
    /// domain intervals are clipped to the window and the scale is rebuilt
    /// over what remains. If nothing remains, [`Error::EmptyDomain`] is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(1, 10)?, Interval::try_new(21, 30)?])?;
    ///
    /// let zoomed = domain.zoom(5, 25)?;
    /// assert_eq!(zoomed.start(), 5);
    /// assert_eq!(zoomed.stop(), 25);
    /// assert_eq!(zoomed.size(), 11);
    ///
    /// assert!(domain.zoom(11, 20).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn zoom(&self, start: Position, stop: Position) -> Result<Self> {
        let clipped = self
            .intervals
            .iter()
            .filter_map(|interval| interval.clip(start, stop))
            .collect::<Vec<_>>();

        let intervals = NonEmpty::from_vec(clipped).ok_or(Error::EmptyDomain)?;

        debug!(
            start,
            stop,
            intervals = intervals.len(),
            "zoomed domain to window"
        );

        Ok(Self { intervals })
    }
}
