//! Tabular export of recorded trajectories.
//!
//! A trajectory is an ordered sequence of flattened 2-D embeddings. The
//! exporter reshapes it into one row per `(snapshot, point)` pair so that
//! downstream visualization can index the table by "iteration slice":
//! slice-major, then point-minor, with point order matching the per-point
//! metadata. Tables round-trip through a delimited text format with a
//! leading slice-index column.

use embedtrace_core::types::{DVector, Scalar};
use std::io::{BufRead, Write};
use thiserror::Error;

/// Errors that can occur while exporting or re-reading a trajectory.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A snapshot's length does not match `2 * n_points`.
    #[error("Snapshot {slice} has length {actual}, expected {expected}")]
    SnapshotShape {
        /// Index of the offending snapshot
        slice: usize,
        /// Expected length (`2 * n_points`)
        expected: usize,
        /// Actual snapshot length
        actual: usize,
    },

    /// A line of delimited text could not be parsed.
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// An underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    fn parse<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Per-point metadata carried through the export.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointMeta {
    /// Display label of the point
    pub label: String,
    /// Category the point belongs to (e.g. a sector)
    pub category: String,
}

impl PointMeta {
    /// Creates point metadata from anything string-like.
    pub fn new<S1: Into<String>, S2: Into<String>>(label: S1, category: S2) -> Self {
        Self {
            label: label.into(),
            category: category.into(),
        }
    }
}

/// One `(snapshot, point)` pair of an exported trajectory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryRow<T>
where
    T: Scalar,
{
    /// Iteration-slice identifier (snapshot index)
    pub slice_index: usize,
    /// X coordinate of the point in this slice
    pub x: T,
    /// Y coordinate of the point in this slice
    pub y: T,
    /// Point label
    pub label: String,
    /// Point category
    pub category: String,
}

/// Indexable table of trajectory rows.
///
/// Row count is `n_slices * n_points`; rows are ordered slice-major then
/// point-minor, points in metadata order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryTable<T>
where
    T: Scalar,
{
    rows: Vec<TrajectoryRow<T>>,
    n_points: usize,
}

impl<T> TrajectoryTable<T>
where
    T: Scalar,
{
    /// Builds a table from recorded snapshots and per-point metadata.
    ///
    /// Each snapshot must hold a flattened 2-D embedding of
    /// `points.len()` points, i.e. have length `2 * points.len()` with
    /// coordinates interleaved as `[x0, y0, x1, y1, ..]`.
    pub fn from_snapshots(
        snapshots: &[DVector<T>],
        points: &[PointMeta],
    ) -> Result<Self, ExportError> {
        let n_points = points.len();
        let expected = 2 * n_points;

        let mut rows = Vec::with_capacity(snapshots.len() * n_points);
        for (slice_index, snapshot) in snapshots.iter().enumerate() {
            if snapshot.len() != expected {
                return Err(ExportError::SnapshotShape {
                    slice: slice_index,
                    expected,
                    actual: snapshot.len(),
                });
            }
            for (point_index, meta) in points.iter().enumerate() {
                rows.push(TrajectoryRow {
                    slice_index,
                    x: snapshot[2 * point_index],
                    y: snapshot[2 * point_index + 1],
                    label: meta.label.clone(),
                    category: meta.category.clone(),
                });
            }
        }

        Ok(Self { rows, n_points })
    }

    /// Returns the rows in slice-major, point-minor order.
    pub fn rows(&self) -> &[TrajectoryRow<T>] {
        &self.rows
    }

    /// Returns the number of points per slice.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the number of iteration slices.
    pub fn n_slices(&self) -> usize {
        if self.n_points == 0 {
            0
        } else {
            self.rows.len() / self.n_points
        }
    }

    /// Consumes the table, returning the owned rows.
    pub fn into_rows(self) -> Vec<TrajectoryRow<T>> {
        self.rows
    }

    /// Writes the table as delimited text.
    ///
    /// The leading column is the slice index, followed by the x and y
    /// coordinates, the label, and the category. Labels and categories
    /// must not contain the delimiter.
    pub fn write_delimited<W: Write>(&self, writer: &mut W) -> Result<(), ExportError> {
        writeln!(writer, "slice_index,x,y,label,category")?;
        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{}",
                row.slice_index, row.x, row.y, row.label, row.category
            )?;
        }
        Ok(())
    }

    /// Reads a table back from the delimited text produced by
    /// [`write_delimited`](Self::write_delimited).
    pub fn read_delimited<R: BufRead>(reader: R) -> Result<Self, ExportError> {
        let mut rows: Vec<TrajectoryRow<T>> = Vec::new();
        let mut n_points = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if index == 0 {
                // Header line.
                continue;
            }
            if line.is_empty() {
                continue;
            }
            let line_number = index + 1;

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 5 {
                return Err(ExportError::parse(
                    line_number,
                    format!("expected 5 fields, got {}", fields.len()),
                ));
            }

            let slice_index: usize = fields[0]
                .parse()
                .map_err(|_| ExportError::parse(line_number, "invalid slice index"))?;
            let x = fields[1]
                .parse::<f64>()
                .map_err(|_| ExportError::parse(line_number, "invalid x coordinate"))?;
            let y = fields[2]
                .parse::<f64>()
                .map_err(|_| ExportError::parse(line_number, "invalid y coordinate"))?;

            if slice_index == 0 {
                n_points += 1;
            }
            rows.push(TrajectoryRow {
                slice_index,
                x: <T as Scalar>::from_f64(x),
                y: <T as Scalar>::from_f64(y),
                label: fields[3].to_string(),
                category: fields[4].to_string(),
            });
        }

        Ok(Self { rows, n_points })
    }
}
