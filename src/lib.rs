//! `regionview` is a crate for laying out genomic regions on screen.
//!
//! Genome browsers rarely draw a contiguous stretch of a chromosome. Instead,
//! a gene page draws only its exons (plus some padding), squeezing out the
//! introns between them. The facilities in this crate compute the geometry
//! behind such views:
//!
//! - [`interval`] provides 1-based, fully-closed intervals with an attached
//!   payload, along with [merging](interval::merge_overlapping()) and N-way
//!   [intersection](interval::intersect()) of interval lists.
//! - [`region`] parses contig-qualified regions such as `1-55039447-55064852`
//!   and converts interbase intervals into them.
//! - [`scale`] builds a [domain](scale::Domain) out of a set of regions and
//!   maps positions within it onto a pixel range (and back).
//! - [`track`] restricts the annotations of a track to the regions in view.
//! - [`histogram`] bins raw value counts (e.g., short tandem repeat allele
//!   sizes) into bins sized to the available pixel extent.
//! - [`signal`] compresses dense per-region signal into flat segments.
//! - [`transcript`] orders a gene's transcripts for display and lays out
//!   their tissue expression heatmap.
//!
//! Everything here is a pure computation over in-memory values. Errors are
//! returned immediately to the caller rather than producing silently-wrong
//! geometry.
//!
//! ## Scales
//!
//! The most common task is to map the positions of a gene's features onto
//! the horizontal pixel range of a plot. A [`scale::Builder`] collects the
//! regions to show, how much padding to add around them, and the pixel range
//! to map onto.
//!
//! ```
//! use regionview::interval::Interval;
//! use regionview::scale;
//!
//! let exons = [
//!     Interval::try_new(55039548, 55040045)?,
//!     Interval::try_new(55043820, 55044034)?,
//!     Interval::try_new(55046523, 55046646)?,
//! ];
//!
//! let scale = scale::Builder::default()
//!     .padding(75)
//!     .width(1000.0)
//!     .try_build_from(&exons)?;
//!
//! // The first padded base starts the range, the last one ends it.
//! assert_eq!(scale.base_start(55039473), 0.0);
//! assert_eq!(scale.position(55046721), 1000.0);
//!
//! // Positions in the introns are squeezed onto the end of the preceding
//! // region.
//! assert_eq!(scale.position(55042000), scale.position(55040120));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Intersections
//!
//! Annotation tracks frequently need to be restricted to one another, such
//! as regional constraint regions restricted to a gene's coding exons. The
//! payloads of the intersected intervals are combined with the [`Overlay`]
//! policy: later lists overwrite earlier ones.
//!
//! ```
//! use regionview::interval::Fields;
//! use regionview::interval::Interval;
//! use regionview::interval::Value;
//! use regionview::interval::intersect;
//!
//! let exons = vec![
//!     Interval::try_with_payload(2, 4, Fields::from([("feature".into(), Value::from("CDS"))]))?,
//!     Interval::try_with_payload(6, 8, Fields::from([("feature".into(), Value::from("CDS"))]))?,
//! ];
//!
//! let constraint = vec![Interval::try_with_payload(
//!     1,
//!     7,
//!     Fields::from([("obs_exp".into(), Value::from(0.4))]),
//! )?];
//!
//! let intersection = intersect(&[exons, constraint])?;
//! assert_eq!(intersection.len(), 2);
//! assert_eq!(intersection[1].start(), 6);
//! assert_eq!(intersection[1].stop(), 7);
//! assert_eq!(intersection[1].payload().len(), 2);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Overlay`]: interval::Overlay

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod histogram;
pub mod interval;
pub mod region;
pub mod scale;
pub mod signal;
pub mod track;
pub mod transcript;

pub use interval::Interval;
pub use region::Region;
pub use scale::Scale;
