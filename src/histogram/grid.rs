//! Two-dimensional histograms.
//!
//! Each axis is binned independently with a [`Binner`], and every `(x, y)`
//! pair lands in exactly one cell of the resulting grid.

use crate::histogram::BinRange;
use crate::histogram::Binner;
use crate::histogram::Error;

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A single cell of a two-dimensional histogram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bin2D {
    /// The index of the bin along the x axis.
    x_index: usize,

    /// The index of the bin along the y axis.
    y_index: usize,

    /// The range of x values covered by the bin.
    x_range: BinRange,

    /// The range of y values covered by the bin.
    y_range: BinRange,

    /// The label of the bin along the x axis.
    x_label: String,

    /// The label of the bin along the y axis.
    y_label: String,

    /// The total count of the pairs in the bin.
    count: u64,
}

impl Bin2D {
    /// Gets the index of the bin along the x axis.
    pub fn x_index(&self) -> usize {
        self.x_index
    }

    /// Gets the index of the bin along the y axis.
    pub fn y_index(&self) -> usize {
        self.y_index
    }

    /// Gets the range of x values covered by the bin.
    pub fn x_range(&self) -> &BinRange {
        &self.x_range
    }

    /// Gets the range of y values covered by the bin.
    pub fn y_range(&self) -> &BinRange {
        &self.y_range
    }

    /// Gets the label of the bin along the x axis.
    pub fn x_label(&self) -> &str {
        self.x_label.as_str()
    }

    /// Gets the label of the bin along the y axis.
    pub fn y_label(&self) -> &str {
        self.y_label.as_str()
    }

    /// Gets the total count of the pairs in the bin.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Indicates whether the pair `(x, y)` lands in this bin.
    pub fn contains(&self, x: u64, y: u64) -> bool {
        self.x_range.contains(x) && self.y_range.contains(y)
    }
}

/// A dense two-dimensional histogram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Histogram2D {
    /// The binner for the x axis.
    x: Binner,

    /// The binner for the y axis.
    y: Binner,

    /// The bins, ordered by y index and then by x index.
    bins: Vec<Bin2D>,
}

impl Histogram2D {
    /// Bins `(x, y, count)` triples into a grid sized to the available
    /// pixel width and height.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::histogram::Histogram2D;
    ///
    /// // Genotypes as (short allele repeats, long allele repeats, count).
    /// let genotypes = [(6, 6, 50), (6, 7, 20), (7, 30, 2), (12, 95, 1)];
    ///
    /// let histogram = Histogram2D::try_new(&genotypes, 20, 100, 400, 100)?;
    ///
    /// assert_eq!(histogram.x().bin_size(), 1);
    /// assert_eq!(histogram.y().bin_size(), 10);
    ///
    /// let bin = histogram.get(6, 0).unwrap();
    /// assert_eq!(bin.x_label(), "6");
    /// assert_eq!(bin.y_label(), "0 - 9");
    /// assert_eq!(bin.count(), 70);
    ///
    /// assert_eq!(histogram.total(), 73);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        data: &[(u64, u64, u64)],
        max_x: u64,
        max_y: u64,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self> {
        let x = Binner::try_new(max_x, pixel_width)?;
        let y = Binner::try_new(max_y, pixel_height)?;
        Ok(Histogram2D::with_binners(x, y, data))
    }

    /// Bins `(x, y, count)` triples with existing binners for each axis.
    pub fn with_binners(x: Binner, y: Binner, data: &[(u64, u64, u64)]) -> Self {
        let width = x.bin_count();
        let mut counts = vec![0u64; width * y.bin_count()];

        for (x_value, y_value, count) in data {
            counts[y.index(*y_value) * width + x.index(*x_value)] += count;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let (x_index, y_index) = (i % width, i / width);

                // SAFETY: both indices are always within the bounds of their
                // respective binners.
                Bin2D {
                    x_index,
                    y_index,
                    x_range: x.range(x_index).unwrap(),
                    y_range: y.range(y_index).unwrap(),
                    x_label: x.label(x_index).unwrap(),
                    y_label: y.label(y_index).unwrap(),
                    count,
                }
            })
            .collect();

        Self { x, y, bins }
    }

    /// Gets the binner for the x axis.
    pub fn x(&self) -> &Binner {
        &self.x
    }

    /// Gets the binner for the y axis.
    pub fn y(&self) -> &Binner {
        &self.y
    }

    /// Gets all bins, ordered by y index and then by x index.
    pub fn bins(&self) -> &[Bin2D] {
        &self.bins
    }

    /// Consumes `self` and returns the bins.
    pub fn into_bins(self) -> Vec<Bin2D> {
        self.bins
    }

    /// Gets the bin at the provided indices.
    pub fn get(&self, x_index: usize, y_index: usize) -> Option<&Bin2D> {
        if x_index >= self.x.bin_count() || y_index >= self.y.bin_count() {
            return None;
        }

        self.bins.get(y_index * self.x.bin_count() + x_index)
    }

    /// Gets the total count across all bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count()).sum()
    }

    /// Gets the largest count in any bin.
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count()).max().unwrap_or(0)
    }

    /// Selects the raw triples that landed in `bin`.
    ///
    /// This is how a caller drills down from a selected bin to the
    /// observations that make it up.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::histogram::Histogram2D;
    ///
    /// let genotypes = [(6, 6, 50), (6, 7, 20), (7, 30, 2), (12, 95, 1), (12, 150, 1)];
    /// let histogram = Histogram2D::try_new(&genotypes, 20, 100, 400, 100)?;
    ///
    /// let bin = histogram.get(12, 9).unwrap();
    /// assert_eq!(histogram.select(&genotypes, bin), vec![&(12, 95, 1)]);
    ///
    /// // Values past the maximum are selected by the last bin.
    /// let bin = histogram.get(12, 10).unwrap();
    /// assert_eq!(histogram.select(&genotypes, bin), vec![&(12, 150, 1)]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn select<'a>(&self, data: &'a [(u64, u64, u64)], bin: &Bin2D) -> Vec<&'a (u64, u64, u64)> {
        data.iter()
            .filter(|(x, y, _)| bin.contains(*x, *y))
            .collect()
    }
}
