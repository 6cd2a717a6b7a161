//! Histograms with externally-defined bin edges.

use crate::histogram::Error;

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A labelled bin of a [`FixedHistogram`].
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBin {
    /// The label of the bin.
    label: String,

    /// The number of values in the bin.
    count: u64,
}

impl FixedBin {
    /// Gets the label of the bin.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Gets the number of values in the bin.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// A histogram whose bins were computed elsewhere.
///
/// Along with the counts between each pair of consecutive edges, the
/// histogram carries the number of values below the first edge and above the
/// last edge.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedHistogram {
    /// The bin edges.
    edges: Vec<f64>,

    /// The counts between consecutive edges.
    counts: Vec<u64>,

    /// The number of values below the first edge.
    n_smaller: u64,

    /// The number of values above the last edge.
    n_larger: u64,
}

impl FixedHistogram {
    /// Attempts to create a new [`FixedHistogram`].
    ///
    /// There must be exactly one more edge than there are counts, and the
    /// edges must be finite and strictly increasing.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::histogram::FixedHistogram;
    ///
    /// let ages = FixedHistogram::try_new(vec![30.0, 35.0, 40.0], vec![12, 20], 3, 1)?;
    ///
    /// let labels = ages.bins().iter().map(|bin| bin.label().to_string()).collect::<Vec<_>>();
    /// assert_eq!(labels, vec!["< 30", "30-35", "35-40", "> 40"]);
    /// assert_eq!(ages.total(), 36);
    ///
    /// assert!(FixedHistogram::try_new(vec![30.0, 35.0], vec![12, 20], 0, 0).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        edges: Vec<f64>,
        counts: Vec<u64>,
        n_smaller: u64,
        n_larger: u64,
    ) -> Result<Self> {
        if edges.len() != counts.len() + 1 {
            return Err(Error::MismatchedEdges {
                edges: edges.len(),
                counts: counts.len(),
            });
        }

        for (i, edge) in edges.iter().enumerate() {
            if !edge.is_finite() || (i > 0 && *edge <= edges[i - 1]) {
                return Err(Error::UnorderedEdges(i));
            }
        }

        Ok(Self {
            edges,
            counts,
            n_smaller,
            n_larger,
        })
    }

    /// Gets the bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Gets the number of values below the first edge.
    pub fn n_smaller(&self) -> u64 {
        self.n_smaller
    }

    /// Gets the number of values above the last edge.
    pub fn n_larger(&self) -> u64 {
        self.n_larger
    }

    /// Gets the labelled bins, including one bin for the values below the
    /// first edge and one for the values above the last edge.
    pub fn bins(&self) -> Vec<FixedBin> {
        // SAFETY: there is always at least one edge.
        let first = self.edges.first().unwrap();
        let last = self.edges.last().unwrap();

        let inner = self
            .edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(pair, count)| FixedBin {
                label: format!("{}-{}", pair[0], pair[1]),
                count: *count,
            });

        std::iter::once(FixedBin {
            label: format!("< {first}"),
            count: self.n_smaller,
        })
        .chain(inner)
        .chain(std::iter::once(FixedBin {
            label: format!("> {last}"),
            count: self.n_larger,
        }))
        .collect()
    }

    /// Gets the total count, including values outside of the edges.
    pub fn total(&self) -> u64 {
        self.n_smaller + self.counts.iter().sum::<u64>() + self.n_larger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_edges_are_rejected() {
        let err = FixedHistogram::try_new(vec![1.0, 3.0, 2.0], vec![0, 0], 0, 0).unwrap_err();
        assert_eq!(err, Error::UnorderedEdges(2));

        let err = FixedHistogram::try_new(vec![1.0, 1.0], vec![0], 0, 0).unwrap_err();
        assert_eq!(err, Error::UnorderedEdges(1));

        let err = FixedHistogram::try_new(vec![f64::NAN], vec![], 0, 0).unwrap_err();
        assert_eq!(err, Error::UnorderedEdges(0));
    }

    #[test]
    fn test_mismatched_edges_are_rejected() {
        let err = FixedHistogram::try_new(vec![], vec![], 0, 0).unwrap_err();
        assert_eq!(err, Error::MismatchedEdges { edges: 0, counts: 0 });
    }

    #[test]
    fn test_a_single_edge_has_only_outer_bins()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let histogram = FixedHistogram::try_new(vec![0.5], vec![], 4, 6)?;
        let bins = histogram.bins();

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].label(), "< 0.5");
        assert_eq!(bins[1].label(), "> 0.5");
        assert_eq!(histogram.total(), 10);

        Ok(())
    }
}
