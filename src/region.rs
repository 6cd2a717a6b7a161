//! Contig-qualified regions.
//!
//! Regions are written in the form `<contig>-<start>-<stop>` (e.g.,
//! `1-55039447-55064852`), where the start and stop are 1-based and
//! inclusive. A contig name consists of letters, digits, `_`, and `.` (e.g.,
//! `1`, `X`, `MT`, or `GL000220.1`). A leading `chr` is accepted and dropped
//! from the contig name, and a region consisting of a single position may be
//! written as `<contig>-<position>`.
//!
//! Regions can also be converted from an interbase interval (e.g.,
//! `seq0:+:0-10`) as handled by the [`omics`] crate. An interbase interval
//! sits between bases, so `seq0:+:0-10` covers the bases `1` through `10`.

use std::str::FromStr;
use std::sync::LazyLock;

use omics::coordinate::Strand;
use omics::coordinate::interval::interbase::Interval as InterbaseInterval;
use regex::Regex;

use crate::interval;
use crate::interval::Interval;
use crate::interval::Position;

/// The pattern for a region identifier.
static REGION: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: the pattern is a valid regular expression.
    Regex::new(r"^(?:chr)?([A-Za-z0-9_.]+)-([0-9]+)(?:-([0-9]+))?$").unwrap()
});

/// An error related to a [`Region`].
#[derive(Debug)]
pub enum Error {
    /// An interval error.
    Interval(interval::Error),

    /// Could not parse a region from the given value.
    ParseError(String),

    /// Could not parse an interbase interval from the given value.
    InvalidInterbaseInterval(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Interval(err) => write!(f, "interval error: {err}"),
            Error::ParseError(value) => write!(f, "could not parse region from the value: {value}"),
            Error::InvalidInterbaseInterval(err) => write!(f, "invalid interbase interval: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A fully-closed interval on a named contig.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    /// The contig name (without a `chr` prefix).
    contig: String,

    /// The interval on the contig.
    interval: Interval,
}

impl Region {
    /// Attempts to create a new [`Region`].
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::region::Region;
    ///
    /// let region = Region::try_new("1", 55039447, 55064852)?;
    /// assert_eq!(region.contig(), "1");
    /// assert_eq!(region.interval().size(), 25406);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(contig: impl Into<String>, start: Position, stop: Position) -> Result<Self> {
        let interval = Interval::try_new(start, stop).map_err(Error::Interval)?;

        Ok(Self {
            contig: contig.into(),
            interval,
        })
    }

    /// Attempts to create a [`Region`] from an interbase interval string
    /// (e.g., `seq0:+:0-10`).
    ///
    /// Negative-stranded intervals cover the same bases as their positive
    /// counterparts, so `seq0:-:10-0` yields the same region as
    /// `seq0:+:0-10`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::region::Region;
    ///
    /// let region = Region::try_from_interbase("seq0:+:0-10")?;
    /// assert_eq!(region.to_string(), "seq0-1-10");
    ///
    /// let region = Region::try_from_interbase("seq0:-:10-0")?;
    /// assert_eq!(region.to_string(), "seq0-1-10");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_interbase(value: &str) -> Result<Self> {
        let interval = value
            .parse::<InterbaseInterval>()
            .map_err(|err| Error::InvalidInterbaseInterval(err.to_string()))?;

        Region::try_from(interval)
    }

    /// Gets the contig name.
    pub fn contig(&self) -> &str {
        self.contig.as_str()
    }

    /// Gets the interval by reference.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Consumes `self` and returns the contig name and interval.
    pub fn into_parts(self) -> (String, Interval) {
        (self.contig, self.interval)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.contig,
            self.interval.start(),
            self.interval.stop()
        )
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = REGION
            .captures(s.trim())
            .ok_or_else(|| Error::ParseError(s.to_string()))?;

        // SAFETY: the first two groups are not optional in the pattern.
        let contig = captures.get(1).unwrap().as_str();
        let start = captures.get(2).unwrap().as_str();
        let stop = captures.get(3).map(|m| m.as_str()).unwrap_or(start);

        let start = start
            .parse::<Position>()
            .map_err(|_| Error::ParseError(s.to_string()))?;
        let stop = stop
            .parse::<Position>()
            .map_err(|_| Error::ParseError(s.to_string()))?;

        Region::try_new(contig, start, stop)
    }
}

impl TryFrom<InterbaseInterval> for Region {
    type Error = Error;

    fn try_from(value: InterbaseInterval) -> Result<Self> {
        let (start, end) = value.into_coordinates();
        let (contig, strand, start) = start.into_parts();
        let (_, _, end) = end.into_parts();

        let (start, end) = (start.get(), end.get());

        // Interbase positions sit between bases: the first base following
        // the lower position is the first base covered.
        let (start, stop) = match strand {
            Strand::Positive => (start + 1, end),
            Strand::Negative => (end + 1, start),
        };

        Region::try_new(contig.into_inner(), start, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing_region_identifiers() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let region = "1-55039447-55064852".parse::<Region>()?;
        assert_eq!(region.contig(), "1");
        assert_eq!(region.interval(), &Interval::try_new(55039447, 55064852)?);

        let region = "chrX-100-200".parse::<Region>()?;
        assert_eq!(region.contig(), "X");

        let region = "MT-42".parse::<Region>()?;
        assert_eq!(region.interval(), &Interval::try_new(42, 42)?);

        Ok(())
    }

    #[test]
    fn test_invalid_region_identifiers() {
        for value in ["", "1", "1-", "1-a-10", "1:100-200", "-1-10", "1-10-20-30"] {
            let err = value.parse::<Region>().unwrap_err();
            assert!(matches!(err, Error::ParseError(_)), "{value}");
        }

        let err = "1-200-100".parse::<Region>().unwrap_err();
        assert!(matches!(
            err,
            Error::Interval(interval::Error::StartGreaterThanStop(200, 100))
        ));
    }

    #[test]
    fn test_region_display_round_trips() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let region = Region::try_new("17", 7661779, 7687538)?;
        assert_eq!(region.to_string(), "17-7661779-7687538");
        assert_eq!(region.to_string().parse::<Region>()?, region);

        Ok(())
    }

    #[test]
    fn test_non_human_contigs_round_trip()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let region = Region::try_from_interbase("seq0:+:0-10")?;
        assert_eq!(region.to_string().parse::<Region>()?, region);

        let region = "GL000220.1-105-209".parse::<Region>()?;
        assert_eq!(region.contig(), "GL000220.1");
        assert_eq!(region.to_string(), "GL000220.1-105-209");

        Ok(())
    }

    #[test]
    fn test_interbase_conversion() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let region = Region::try_from_interbase("seq0:+:9-10")?;
        assert_eq!(region.interval(), &Interval::try_new(10, 10)?);

        let region = Region::try_from_interbase("seq0:-:5-2")?;
        assert_eq!(region.interval(), &Interval::try_new(3, 5)?);

        assert!(matches!(
            Region::try_from_interbase("seq0"),
            Err(Error::InvalidInterbaseInterval(_))
        ));

        Ok(())
    }
}
