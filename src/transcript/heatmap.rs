//! Layout of the tissue expression heatmap of a gene's transcripts.
//!
//! Rows are transcripts and columns are tissues. Every cell is a rectangle
//! in pixel space carrying the expression of its transcript in its tissue.

use std::collections::BTreeSet;

use tracing::debug;

use crate::transcript::Transcript;

/// The order of the tissue columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TissueOrder {
    /// Tissues ordered by name.
    #[default]
    Alphabetical,

    /// Tissues ordered by their mean expression across the transcripts
    /// (highest first), then by name.
    MeanExpression,
}

/// A single cell of a heatmap.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// The row of the cell.
    pub row: usize,

    /// The column of the cell.
    pub column: usize,

    /// The left edge of the cell in pixels.
    pub x: f64,

    /// The top edge of the cell in pixels.
    pub y: f64,

    /// The width of the cell in pixels.
    pub width: f64,

    /// The height of the cell in pixels.
    pub height: f64,

    /// The expression of the row's transcript in the column's tissue.
    pub value: f64,
}

/// The layout of a heatmap.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// The transcript identifiers, one per row.
    rows: Vec<String>,

    /// The tissues, one per column.
    columns: Vec<String>,

    /// The cells, ordered by row and then by column.
    cells: Vec<Cell>,
}

impl Layout {
    /// Lays out a heatmap of `transcripts` with cells of the given size.
    ///
    /// The transcripts are laid out in the order they are provided, which is
    /// usually the order given by [`sort()`](crate::transcript::sort). The
    /// columns cover every tissue any transcript is expressed in; a
    /// transcript without a value for a tissue gets `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regionview::transcript::Layout;
    /// use regionview::transcript::TissueOrder;
    /// use regionview::transcript::Transcript;
    ///
    /// let transcripts = vec![
    ///     Transcript::new("ENST00000302118").with_tissues([("Lung", 1.0), ("Liver", 4.0)]),
    ///     Transcript::new("ENST00000371953").with_tissues([("Lung", 2.0)]),
    /// ];
    ///
    /// let layout = Layout::new(&transcripts, TissueOrder::Alphabetical, 20.0, 10.0);
    /// assert_eq!(layout.columns(), ["Liver", "Lung"]);
    /// assert_eq!(layout.cells().len(), 4);
    ///
    /// let cell = &layout.cells()[3];
    /// assert_eq!((cell.row, cell.column), (1, 1));
    /// assert_eq!((cell.x, cell.y), (20.0, 10.0));
    /// assert_eq!(cell.value, 2.0);
    ///
    /// let layout = Layout::new(&transcripts, TissueOrder::MeanExpression, 20.0, 10.0);
    /// assert_eq!(layout.columns(), ["Liver", "Lung"]);
    /// ```
    pub fn new(
        transcripts: &[Transcript],
        order: TissueOrder,
        cell_width: f64,
        cell_height: f64,
    ) -> Self {
        let mut columns = transcripts
            .iter()
            .flat_map(|transcript| transcript.tissues().keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();

        if order == TissueOrder::MeanExpression && !transcripts.is_empty() {
            let mean = |tissue: &str| {
                transcripts
                    .iter()
                    .map(|transcript| transcript.expression(tissue))
                    .sum::<f64>()
                    / transcripts.len() as f64
            };

            // Columns are already in alphabetical order, so a stable sort
            // breaks ties by name.
            let mut keyed = columns
                .into_iter()
                .map(|tissue| (mean(&tissue), tissue))
                .collect::<Vec<_>>();
            keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));
            columns = keyed.into_iter().map(|(_, tissue)| tissue).collect();
        }

        let cells = transcripts
            .iter()
            .enumerate()
            .flat_map(|(row, transcript)| {
                columns.iter().enumerate().map(move |(column, tissue)| Cell {
                    row,
                    column,
                    x: column as f64 * cell_width,
                    y: row as f64 * cell_height,
                    width: cell_width,
                    height: cell_height,
                    value: transcript.expression(tissue),
                })
            })
            .collect::<Vec<_>>();

        debug!(
            rows = transcripts.len(),
            columns = columns.len(),
            ?order,
            "laid out expression heatmap"
        );

        Self {
            rows: transcripts
                .iter()
                .map(|transcript| transcript.id().to_string())
                .collect(),
            columns,
            cells,
        }
    }

    /// Gets the transcript identifiers, one per row.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Gets the tissues, one per column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Gets the cells, ordered by row and then by column.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at the provided row and column.
    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        if column >= self.columns.len() {
            return None;
        }

        self.cells.get(row * self.columns.len() + column)
    }

    /// Gets the largest value of any cell.
    pub fn max_value(&self) -> f64 {
        self.cells
            .iter()
            .map(|cell| cell.value)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript;

    #[test]
    fn test_tissues_are_ordered_by_mean_expression() {
        let mut transcripts = vec![
            Transcript::new("ENST00000000001").with_tissues([
                ("Adipose", 1.0),
                ("Brain", 5.0),
                ("Colon", 3.0),
            ]),
            Transcript::new("ENST00000000002").with_tissues([("Adipose", 3.0), ("Colon", 1.0)]),
        ];
        transcript::sort(&mut transcripts, Some("ENST00000000002"));

        let layout = Layout::new(&transcripts, TissueOrder::MeanExpression, 1.0, 1.0);

        assert_eq!(layout.rows(), ["ENST00000000002", "ENST00000000001"]);
        assert_eq!(layout.columns(), ["Brain", "Adipose", "Colon"]);
        assert_eq!(layout.get(0, 0).map(|cell| cell.value), Some(0.0));
        assert_eq!(layout.get(1, 0).map(|cell| cell.value), Some(5.0));
        assert_eq!(layout.max_value(), 5.0);
    }

    #[test]
    fn test_an_empty_heatmap_has_no_cells() {
        let layout = Layout::new(&[], TissueOrder::MeanExpression, 10.0, 10.0);
        assert!(layout.rows().is_empty());
        assert!(layout.columns().is_empty());
        assert!(layout.get(0, 0).is_none());
    }
}
