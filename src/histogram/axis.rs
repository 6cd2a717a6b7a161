//! Adaptive binning along a single axis.
//!
//! The bin size is chosen so that each bin is roughly
//! [`DEFAULT_PIXELS_PER_BIN`] pixels wide, but never less than one unit:
//!
//! ```text
//! bin size  = max(1, ceil(max value / (pixel extent / pixels per bin)))
//! bin count = floor(max value / bin size) + 1
//! ```
//!
//! A value `v` lands in bin `floor(v / bin size)`. Values greater than the
//! maximum land in the last bin, which is therefore open-ended.

use tracing::debug;

use crate::histogram::Error;

/// The default target width of a bin in pixels.
pub const DEFAULT_PIXELS_PER_BIN: u32 = 10;

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The range of values covered by a bin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BinRange {
    /// The first value in the bin.
    start: u64,

    /// The last value in the bin (before any overflow).
    stop: u64,

    /// Whether values greater than `stop` also land in this bin.
    overflow: bool,
}

impl BinRange {
    /// Gets the first value in the bin.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the last value in the bin.
    ///
    /// If the bin is open-ended (see [`BinRange::overflow()`]), values past
    /// this one also land in the bin.
    pub fn stop(&self) -> u64 {
        self.stop
    }

    /// Whether this is the last bin, which also receives every value past
    /// [`BinRange::stop()`].
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Indicates whether a value lands in this bin.
    pub fn contains(&self, value: u64) -> bool {
        value >= self.start && (self.overflow || value <= self.stop)
    }
}

/// Bins values from `0` up to a maximum value along one axis.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binner {
    /// The maximum value expected on the axis.
    max_value: u64,

    /// The number of values covered by each bin.
    bin_size: u64,

    /// The number of bins.
    bin_count: usize,
}

impl Binner {
    /// Attempts to create a new [`Binner`] aiming for bins
    /// [`DEFAULT_PIXELS_PER_BIN`] pixels wide.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::histogram::Binner;
    ///
    /// // Plenty of room: one bin per value.
    /// let binner = Binner::try_new(20, 500)?;
    /// assert_eq!(binner.bin_size(), 1);
    /// assert_eq!(binner.bin_count(), 21);
    ///
    /// // 100 pixels fit ten bins, so each covers ten values.
    /// let binner = Binner::try_new(95, 100)?;
    /// assert_eq!(binner.bin_size(), 10);
    /// assert_eq!(binner.bin_count(), 10);
    ///
    /// assert!(Binner::try_new(95, 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(max_value: u64, pixel_extent: u32) -> Result<Self> {
        Binner::try_with_bin_width(max_value, pixel_extent, DEFAULT_PIXELS_PER_BIN)
    }

    /// Attempts to create a new [`Binner`] aiming for bins `pixels_per_bin`
    /// pixels wide.
    pub fn try_with_bin_width(
        max_value: u64,
        pixel_extent: u32,
        pixels_per_bin: u32,
    ) -> Result<Self> {
        if pixel_extent == 0 {
            return Err(Error::ZeroPixelExtent);
        }

        if pixels_per_bin == 0 {
            return Err(Error::ZeroBinWidth);
        }

        let target_bins = f64::from(pixel_extent) / f64::from(pixels_per_bin);
        let bin_size = std::cmp::max(1, (max_value as f64 / target_bins).ceil() as u64);
        let bin_count = (max_value / bin_size) as usize + 1;

        debug!(
            max_value,
            pixel_extent, bin_size, bin_count, "chose histogram bin size"
        );

        Ok(Self {
            max_value,
            bin_size,
            bin_count,
        })
    }

    /// Gets the maximum value expected on the axis.
    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    /// Gets the number of values covered by each bin.
    pub fn bin_size(&self) -> u64 {
        self.bin_size
    }

    /// Gets the number of bins.
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Gets the index of the bin a value lands in.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::histogram::Binner;
    ///
    /// let binner = Binner::try_new(95, 100)?;
    ///
    /// assert_eq!(binner.index(0), 0);
    /// assert_eq!(binner.index(9), 0);
    /// assert_eq!(binner.index(10), 1);
    /// assert_eq!(binner.index(95), 9);
    ///
    /// // Overflow lands in the last bin.
    /// assert_eq!(binner.index(1000), 9);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn index(&self, value: u64) -> usize {
        std::cmp::min((value / self.bin_size) as usize, self.bin_count - 1)
    }

    /// Gets the range of values covered by the bin at `index`.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn range(&self, index: usize) -> Option<BinRange> {
        if index >= self.bin_count {
            return None;
        }

        let start = index as u64 * self.bin_size;

        Some(BinRange {
            start,
            stop: start + self.bin_size - 1,
            overflow: index == self.bin_count - 1,
        })
    }

    /// Gets the label of the bin at `index`.
    ///
    /// The label is the single value in the bin when the bin size is one, and
    /// the inclusive range `"{start} - {stop}"` otherwise.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::histogram::Binner;
    ///
    /// let binner = Binner::try_new(20, 500)?;
    /// assert_eq!(binner.label(7).as_deref(), Some("7"));
    ///
    /// let binner = Binner::try_new(95, 100)?;
    /// assert_eq!(binner.label(1).as_deref(), Some("10 - 19"));
    /// assert_eq!(binner.label(10), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn label(&self, index: usize) -> Option<String> {
        let range = self.range(index)?;

        match self.bin_size {
            1 => Some(range.start().to_string()),
            _ => Some(format!("{} - {}", range.start(), range.stop())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_extents_produce_large_bins()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        // Less than a single bin's worth of pixels.
        let binner = Binner::try_new(50, 5)?;
        assert_eq!(binner.bin_size(), 100);
        assert_eq!(binner.bin_count(), 1);
        assert_eq!(binner.index(50), 0);

        Ok(())
    }

    #[test]
    fn test_a_zero_maximum_has_a_single_bin()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let binner = Binner::try_new(0, 300)?;
        assert_eq!(binner.bin_size(), 1);
        assert_eq!(binner.bin_count(), 1);
        assert_eq!(binner.label(0).as_deref(), Some("0"));

        Ok(())
    }

    #[test]
    fn test_ranges_partition_the_axis() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let binner = Binner::try_with_bin_width(137, 240, 12)?;

        for value in 0..=200 {
            let index = binner.index(value);
            let matching = (0..binner.bin_count())
                .filter(|i| binner.range(*i).unwrap().contains(value))
                .collect::<Vec<_>>();
            assert_eq!(matching, vec![index]);
        }

        Ok(())
    }

    #[test]
    fn test_zero_bin_width_is_rejected() {
        assert_eq!(Binner::try_with_bin_width(10, 100, 0), Err(Error::ZeroBinWidth));
    }
}
