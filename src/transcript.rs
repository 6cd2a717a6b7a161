//! Transcripts and the order in which they are displayed.
//!
//! Transcripts are listed with the preferred transcript of their gene first
//! (the MANE Select transcript when there is one, otherwise the canonical
//! transcript), then by their mean expression across tissues (highest
//! first), and finally by their identifier.

use std::cmp::Ordering;
use std::collections::BTreeMap;

pub mod heatmap;

pub use heatmap::Layout;
pub use heatmap::TissueOrder;

/// A transcript and its expression in each tissue.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    /// The transcript identifier (e.g., `ENST00000302118`).
    id: String,

    /// The expression of the transcript in each tissue.
    tissues: BTreeMap<String, f64>,
}

impl Transcript {
    /// Creates a new [`Transcript`] with no tissue expression.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tissues: BTreeMap::new(),
        }
    }

    /// Sets the expression of the transcript in each tissue.
    pub fn with_tissues<I, K>(mut self, tissues: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.tissues = tissues
            .into_iter()
            .map(|(tissue, value)| (tissue.into(), value))
            .collect();
        self
    }

    /// Gets the transcript identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Gets the expression of the transcript in each tissue.
    pub fn tissues(&self) -> &BTreeMap<String, f64> {
        &self.tissues
    }

    /// Gets the expression of the transcript in a tissue.
    ///
    /// Missing or non-numeric expression is reported as `0.0`.
    pub fn expression(&self, tissue: &str) -> f64 {
        self.tissues
            .get(tissue)
            .copied()
            .map(normalize)
            .unwrap_or(0.0)
    }

    /// Gets the mean expression of the transcript across all of its tissues.
    ///
    /// A transcript without any tissue expression has a mean expression of
    /// `0.0`, and `NaN` values count as `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::transcript::Transcript;
    ///
    /// let transcript =
    ///     Transcript::new("ENST00000302118").with_tissues([("Liver", 3.0), ("Lung", f64::NAN)]);
    /// assert_eq!(transcript.mean_expression(), 1.5);
    ///
    /// assert_eq!(Transcript::new("ENST00000371953").mean_expression(), 0.0);
    /// ```
    pub fn mean_expression(&self) -> f64 {
        if self.tissues.is_empty() {
            return 0.0;
        }

        let total = self.tissues.values().copied().map(normalize).sum::<f64>();
        normalize(total / self.tissues.len() as f64)
    }
}

/// Replaces `NaN` with `0.0` and `-0.0` with `0.0`.
fn normalize(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Compares two transcripts for display.
///
/// The transcript whose identifier matches `preferred` always comes first.
/// Otherwise, transcripts are ordered by descending mean expression and then
/// by ascending identifier, so two transcripts only compare as equal when
/// their identifiers are equal.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
///
/// use regionview::transcript;
/// use regionview::transcript::Transcript;
///
/// let a = Transcript::new("ENST00000302118").with_tissues([("Liver", 1.0)]);
/// let b = Transcript::new("ENST00000371953").with_tissues([("Liver", 9.0)]);
///
/// assert_eq!(transcript::compare(&a, &b, None), Ordering::Greater);
/// assert_eq!(
///     transcript::compare(&a, &b, Some("ENST00000302118")),
///     Ordering::Less
/// );
/// ```
pub fn compare(a: &Transcript, b: &Transcript, preferred: Option<&str>) -> Ordering {
    if let Some(preferred) = preferred {
        match (a.id() == preferred, b.id() == preferred) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }

    b.mean_expression()
        .total_cmp(&a.mean_expression())
        .then_with(|| a.id().cmp(b.id()))
}

/// Sorts transcripts for display (see [`compare()`]).
pub fn sort(transcripts: &mut [Transcript], preferred: Option<&str>) {
    transcripts.sort_by(|a, b| compare(a, b, preferred));
}

/// Picks the preferred transcript of a gene: the MANE Select transcript if
/// there is one, otherwise the canonical transcript.
pub fn preferred_transcript_id<'a>(
    mane_select: Option<&'a str>,
    canonical: Option<&'a str>,
) -> Option<&'a str> {
    mane_select.or(canonical)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom as _;

    use super::*;

    fn transcripts() -> Vec<Transcript> {
        vec![
            Transcript::new("ENST00000000004").with_tissues([("Liver", 2.0), ("Lung", 4.0)]),
            Transcript::new("ENST00000000001").with_tissues([("Liver", 3.0), ("Lung", 3.0)]),
            Transcript::new("ENST00000000003"),
            Transcript::new("ENST00000000002").with_tissues([("Liver", f64::NAN)]),
            Transcript::new("ENST00000000005").with_tissues([("Liver", 0.5), ("Lung", -0.0)]),
        ]
    }

    fn ids(transcripts: &[Transcript]) -> Vec<&str> {
        transcripts.iter().map(|transcript| transcript.id()).collect()
    }

    #[test]
    fn test_ties_are_broken_by_identifier() {
        let mut transcripts = transcripts();
        sort(&mut transcripts, None);

        assert_eq!(
            ids(&transcripts),
            vec![
                "ENST00000000001",
                "ENST00000000004",
                "ENST00000000005",
                "ENST00000000002",
                "ENST00000000003",
            ]
        );
    }

    #[test]
    fn test_the_preferred_transcript_is_always_first() {
        let mut transcripts = transcripts();
        sort(&mut transcripts, Some("ENST00000000003"));

        assert_eq!(transcripts[0].id(), "ENST00000000003");
        assert_eq!(transcripts[1].id(), "ENST00000000001");
    }

    #[test]
    fn test_a_missing_preferred_transcript_changes_nothing() {
        let mut with = transcripts();
        sort(&mut with, Some("ENST99999999999"));

        let mut without = transcripts();
        sort(&mut without, None);

        assert_eq!(ids(&with), ids(&without));
    }

    #[test]
    fn test_sorting_is_independent_of_input_order() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut expected = transcripts();
        sort(&mut expected, Some("ENST00000000005"));

        for _ in 0..20 {
            let mut shuffled = transcripts();
            shuffled.shuffle(&mut rng);
            sort(&mut shuffled, Some("ENST00000000005"));
            assert_eq!(ids(&shuffled), ids(&expected));
        }
    }

    #[test]
    fn test_distinct_transcripts_never_compare_equal() {
        let transcripts = transcripts();

        for a in &transcripts {
            for b in &transcripts {
                assert_eq!(compare(a, b, None) == Ordering::Equal, a.id() == b.id());
            }
        }
    }

    #[test]
    fn test_mane_select_is_preferred_over_canonical() {
        assert_eq!(
            preferred_transcript_id(Some("ENST1"), Some("ENST2")),
            Some("ENST1")
        );
        assert_eq!(preferred_transcript_id(None, Some("ENST2")), Some("ENST2"));
        assert_eq!(preferred_transcript_id(None, None), None);
    }
}
