//! Binning of raw value counts into histograms.
//!
//! The binners here take raw `(value, count)` pairs (e.g., the number of
//! alleles observed at each repeat length of a short tandem repeat) or
//! `(x, y, count)` triples (e.g., the number of genotypes observed for each
//! pair of short/long allele repeat lengths) and produce dense, labelled bins
//! sized to the pixel extent available for drawing them. See [`axis`] for how
//! the bin size is chosen.
//!
//! No count is ever dropped: values past the maximum land in the last bin, so
//! the total of all bin counts always equals the total of the input counts.
//!
//! Histograms with externally-defined bin edges (such as age distributions,
//! which also report the number of values below the first edge and above the
//! last edge) are handled by [`fixed`].

pub mod axis;
pub mod fixed;
pub mod grid;

pub use axis::BinRange;
pub use axis::Binner;
pub use fixed::FixedBin;
pub use fixed::FixedHistogram;
pub use grid::Bin2D;
pub use grid::Histogram2D;

/// An error related to binning a histogram.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The pixel extent available for drawing is zero.
    ZeroPixelExtent,

    /// The requested width of a bin is zero pixels.
    ZeroBinWidth,

    /// The number of bin edges does not match the number of bin counts.
    MismatchedEdges {
        /// The number of edges.
        edges: usize,

        /// The number of counts.
        counts: usize,
    },

    /// The bin edges are not strictly increasing.
    UnorderedEdges(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroPixelExtent => write!(f, "the pixel extent must be greater than zero"),
            Error::ZeroBinWidth => write!(f, "the bin width must be greater than zero"),
            Error::MismatchedEdges { edges, counts } => write!(
                f,
                "expected one more bin edge than bin counts, found {edges} edges and {counts} \
                 counts"
            ),
            Error::UnorderedEdges(index) => {
                write!(f, "bin edges must be strictly increasing: edge {index}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A single bin of a one-dimensional histogram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bin {
    /// The index of the bin.
    index: usize,

    /// The range of values covered by the bin.
    range: BinRange,

    /// The label of the bin.
    label: String,

    /// The total count of the values in the bin.
    count: u64,
}

impl Bin {
    /// Gets the index of the bin.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gets the range of values covered by the bin.
    pub fn range(&self) -> &BinRange {
        &self.range
    }

    /// Gets the label of the bin.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Gets the total count of the values in the bin.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Bins `(value, count)` pairs along a single axis.
///
/// Every bin from `0` up to `max_value` is returned, including empty ones.
///
/// # Examples
///
/// ```
/// use regionview::histogram;
///
/// // Allele sizes (in repeat units) and the number of alleles of each size.
/// let distribution = [(6, 120), (7, 40), (12, 3), (58, 1)];
///
/// let bins = histogram::bin(&distribution, 40, 100)?;
/// assert_eq!(bins.len(), 11);
/// assert_eq!(bins[1].label(), "4 - 7");
/// assert_eq!(bins[1].count(), 160);
///
/// // An expansion past the expected maximum is kept in the last bin.
/// assert_eq!(bins[10].label(), "40 - 43");
/// assert_eq!(bins[10].count(), 1);
///
/// let total = bins.iter().map(|bin| bin.count()).sum::<u64>();
/// assert_eq!(total, 164);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn bin(data: &[(u64, u64)], max_value: u64, pixel_extent: u32) -> Result<Vec<Bin>> {
    let binner = Binner::try_new(max_value, pixel_extent)?;
    Ok(bin_with(&binner, data))
}

/// Bins `(value, count)` pairs with an existing [`Binner`].
pub fn bin_with(binner: &Binner, data: &[(u64, u64)]) -> Vec<Bin> {
    let mut counts = vec![0u64; binner.bin_count()];

    for (value, count) in data {
        counts[binner.index(*value)] += count;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| Bin {
            index,
            // SAFETY: the index is always within the bounds of the binner.
            range: binner.range(index).unwrap(),
            label: binner.label(index).unwrap(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_binning_conserves_counts() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..100 {
            let max_value = rng.gen_range(0..500);
            let pixel_extent = rng.gen_range(1..1200);
            let data = (0..rng.gen_range(1..50))
                .map(|_| (rng.gen_range(0..600), rng.gen_range(0..1000)))
                .collect::<Vec<_>>();

            let bins = bin(&data, max_value, pixel_extent)?;
            let expected = data.iter().map(|(_, count)| count).sum::<u64>();
            let actual = bins.iter().map(|bin| bin.count()).sum::<u64>();

            assert_eq!(actual, expected);
        }

        Ok(())
    }

    #[test]
    fn test_binning_is_deterministic() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = [(3, 10), (17, 2), (17, 5), (44, 9)];
        assert_eq!(bin(&data, 50, 230)?, bin(&data, 50, 230)?);

        Ok(())
    }

    #[test]
    fn test_single_value_bins_are_labelled_by_value()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let bins = bin(&[(2, 1)], 3, 1000)?;
        let labels = bins.iter().map(|bin| bin.label()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["0", "1", "2", "3"]);
        assert_eq!(bins[2].count(), 1);
        assert!(bins[3].range().overflow());

        Ok(())
    }

    #[test]
    fn test_zero_pixel_extent_is_rejected() {
        assert_eq!(bin(&[(1, 1)], 10, 0), Err(Error::ZeroPixelExtent));
    }
}
