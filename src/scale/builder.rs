//! A builder for a [`Scale`].

use tracing::debug;

use crate::interval::Interval;
use crate::interval::Position;
use crate::scale;
use crate::scale::Domain;
use crate::scale::Scale;

/// A [`Result`](std::result::Result) with a [`scale::Error`].
type Result<T> = std::result::Result<T, scale::Error>;

/// A builder for a [`Scale`].
///
/// By default, no padding is applied, the whole domain is shown, and the
/// pixel range is `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Builder {
    /// The number of bases added on either side of each region.
    padding: Position,

    /// The pixel range.
    range: (f64, f64),

    /// The fully-closed window the domain is restricted to, if any.
    window: Option<(Position, Position)>,
}

impl Builder {
    /// Sets the number of bases added on either side of each region.
    pub fn padding(mut self, padding: Position) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the pixel range.
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.range = (lo, hi);
        self
    }

    /// Sets the pixel range to `[0, width]`.
    pub fn width(self, width: f64) -> Self {
        self.range(0.0, width)
    }

    /// Restricts the domain to the fully-closed window `[start, stop]`.
    pub fn zoom(mut self, start: Position, stop: Position) -> Self {
        self.window = Some((start, stop));
        self
    }

    /// Builds a [`Scale`] over the provided regions.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale;
    ///
    /// let exons = [Interval::try_new(101, 200)?, Interval::try_new(501, 600)?];
    ///
    /// let scale = scale::Builder::default()
    ///     .padding(50)
    ///     .width(400.0)
    ///     .try_build_from(&exons)?;
    ///
    /// assert_eq!(scale.size(), 400);
    /// assert_eq!(scale.position(250), 200.0);
    ///
    /// let zoomed = scale::Builder::default()
    ///     .width(100.0)
    ///     .zoom(151, 200)
    ///     .try_build_from(&exons)?;
    ///
    /// assert_eq!(zoomed.size(), 50);
    /// assert_eq!(zoomed.position(175), 50.0);
    ///
    /// // Nothing in the window.
    /// assert!(
    ///     scale::Builder::default()
    ///         .zoom(201, 500)
    ///         .try_build_from(&exons)
    ///         .is_err()
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<P>(&self, regions: &[Interval<P>]) -> Result<Scale> {
        let domain = Domain::try_padded(regions, self.padding).map_err(scale::Error::Domain)?;

        let domain = match self.window {
            Some((start, stop)) => domain.zoom(start, stop).map_err(scale::Error::Domain)?,
            None => domain,
        };

        debug!(
            intervals = domain.intervals().len(),
            size = domain.size(),
            lo = self.range.0,
            hi = self.range.1,
            "built scale"
        );

        Scale::try_new(domain, self.range.0, self.range.1)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            padding: 0,
            range: (0.0, 1.0),
            window: None,
        }
    }
}
