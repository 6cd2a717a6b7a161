//! Annotation tracks laid over a domain.
//!
//! A [`Track`] holds the annotation regions for a single kind of
//! visualization (e.g., the regional constraint regions of a gene) and
//! answers which of them are visible within a [`Domain`].

use rust_lapper as lapper;
use tracing::debug;

use crate::interval::Interval;
use crate::interval::Position;
use crate::scale::Domain;

/// The kind of a track.
///
/// The kind is decided once when the track is created and determines how its
/// annotations are restricted to a domain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Per-base read depth.
    Coverage,

    /// Regional missense constraint.
    RegionalConstraint,

    /// Proportion expressed across transcripts (pext).
    Pext,

    /// Short tandem repeat loci.
    ShortTandemRepeat,

    /// Individual variants.
    Variants,

    /// Whole transcripts.
    Transcripts,
}

impl Kind {
    /// Whether annotations of this kind are trimmed to the domain intervals
    /// they overlap.
    ///
    /// Signal tracks are trimmed so that nothing is drawn outside of the
    /// domain. Variants and transcripts are drawn whole.
    pub fn clips_to_domain(&self) -> bool {
        match self {
            Kind::Coverage | Kind::RegionalConstraint | Kind::Pext | Kind::ShortTandemRepeat => {
                true
            }
            Kind::Variants | Kind::Transcripts => false,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Coverage => write!(f, "coverage"),
            Kind::RegionalConstraint => write!(f, "regional constraint"),
            Kind::Pext => write!(f, "pext"),
            Kind::ShortTandemRepeat => write!(f, "short tandem repeat"),
            Kind::Variants => write!(f, "variants"),
            Kind::Transcripts => write!(f, "transcripts"),
        }
    }
}

/// A set of annotation regions of a single [`Kind`].
#[derive(Debug)]
pub struct Track<P> {
    /// The kind of the track.
    kind: Kind,

    /// The annotation regions.
    annotations: Vec<Interval<P>>,

    /// A lookup from half-open positions to indices into `annotations`.
    lookup: lapper::Lapper<Position, usize>,
}

impl<P: Clone> Track<P> {
    /// Creates a new [`Track`].
    pub fn new(kind: Kind, annotations: Vec<Interval<P>>) -> Self {
        let entries = annotations
            .iter()
            .enumerate()
            .map(|(index, annotation)| lapper::Interval {
                start: annotation.start(),
                stop: annotation.stop() + 1,
                val: index,
            })
            .collect::<Vec<_>>();

        Self {
            kind,
            annotations,
            lookup: lapper::Lapper::new(entries),
        }
    }

    /// Gets the kind of the track.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Gets all annotations in the track.
    pub fn annotations(&self) -> &[Interval<P>] {
        &self.annotations
    }

    /// Gets the annotations that overlap `domain`, sorted by start position.
    ///
    /// If the track's [`Kind`] clips to the domain, each annotation is
    /// returned once per domain interval it overlaps, trimmed to that
    /// interval. Otherwise, each overlapping annotation is returned once,
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::interval::Interval;
    /// use regionview::scale::Domain;
    /// use regionview::track::Kind;
    /// use regionview::track::Track;
    ///
    /// let domain = Domain::try_new(&[Interval::try_new(10, 20)?, Interval::try_new(40, 50)?])?;
    ///
    /// let regions = vec![
    ///     Interval::try_with_payload(1, 45, 0.2)?,
    ///     Interval::try_with_payload(46, 100, 0.8)?,
    ///     Interval::try_with_payload(25, 30, 0.5)?,
    /// ];
    ///
    /// let track = Track::new(Kind::RegionalConstraint, regions.clone());
    /// assert_eq!(
    ///     track.in_view(&domain),
    ///     vec![
    ///         Interval::try_with_payload(10, 20, 0.2)?,
    ///         Interval::try_with_payload(40, 45, 0.2)?,
    ///         Interval::try_with_payload(46, 50, 0.8)?,
    ///     ]
    /// );
    ///
    /// let track = Track::new(Kind::Variants, regions);
    /// assert_eq!(
    ///     track.in_view(&domain),
    ///     vec![
    ///         Interval::try_with_payload(1, 45, 0.2)?,
    ///         Interval::try_with_payload(46, 100, 0.8)?,
    ///     ]
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn in_view(&self, domain: &Domain) -> Vec<Interval<P>> {
        let mut hits = Vec::new();

        for interval in domain.intervals().iter() {
            for entry in self.lookup.find(interval.start(), interval.stop() + 1) {
                hits.push((interval, entry.val));
            }
        }

        let mut results = match self.kind.clips_to_domain() {
            true => hits
                .into_iter()
                .filter_map(|(interval, index)| {
                    self.annotations[index]
                        .clip(interval.start(), interval.stop())
                        .map(|clipped| (clipped, index))
                })
                .collect::<Vec<_>>(),
            false => {
                let mut indices = hits.into_iter().map(|(_, index)| index).collect::<Vec<_>>();
                indices.sort_unstable();
                indices.dedup();

                indices
                    .into_iter()
                    .map(|index| (self.annotations[index].clone(), index))
                    .collect::<Vec<_>>()
            }
        };

        results.sort_by_key(|(annotation, index)| (annotation.start(), *index));

        debug!(
            kind = %self.kind,
            annotations = self.annotations.len(),
            visible = results.len(),
            "restricted track to domain"
        );

        results.into_iter().map(|(annotation, _)| annotation).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotations_touching_a_domain_edge_are_visible()
    -> Result<(), Box<dyn std::error::Error>> {
        let domain = Domain::try_new(&[Interval::try_new(10, 20)?])?;
        let track = Track::new(
            Kind::Pext,
            vec![
                Interval::try_with_payload(1, 10, "left")?,
                Interval::try_with_payload(20, 30, "right")?,
                Interval::try_with_payload(21, 30, "outside")?,
            ],
        );

        let visible = track.in_view(&domain);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0], Interval::try_with_payload(10, 10, "left")?);
        assert_eq!(visible[1], Interval::try_with_payload(20, 20, "right")?);

        Ok(())
    }

    #[test]
    fn test_annotations_reaching_the_maximum_position_are_visible()
    -> Result<(), Box<dyn std::error::Error>> {
        use crate::interval::MAX_POSITION;

        let domain = Domain::try_new(&[Interval::try_new(MAX_POSITION - 10, MAX_POSITION)?])?;
        let track = Track::new(
            Kind::Coverage,
            vec![Interval::try_with_payload(5, MAX_POSITION, 30.0)?],
        );

        assert_eq!(
            track.in_view(&domain),
            vec![Interval::try_with_payload(MAX_POSITION - 10, MAX_POSITION, 30.0)?]
        );

        Ok(())
    }

    #[test]
    fn test_an_empty_track_has_nothing_in_view() -> Result<(), Box<dyn std::error::Error>> {
        let domain = Domain::try_new(&[Interval::try_new(10, 20)?])?;
        let track: Track<()> = Track::new(Kind::Coverage, Vec::new());
        assert!(track.in_view(&domain).is_empty());

        Ok(())
    }

    #[test]
    fn test_unclipped_annotations_spanning_several_intervals_appear_once()
    -> Result<(), Box<dyn std::error::Error>> {
        let domain = Domain::try_new(&[Interval::try_new(10, 20)?, Interval::try_new(30, 40)?])?;
        let track = Track::new(
            Kind::Transcripts,
            vec![Interval::try_with_payload(1, 100, "ENST00000302118")?],
        );

        assert_eq!(track.in_view(&domain).len(), 1);
        assert_eq!(track.kind(), Kind::Transcripts);

        Ok(())
    }
}
