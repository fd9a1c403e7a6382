//! The `OutputWriter` trait implemented by all backend writers.

use al_sim::RunRecord;

use crate::{AircraftSnapshotRow, IncidentRow, OutputResult, PeriodSummaryRow, SpokeSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of aircraft snapshot rows.
    fn write_aircraft(&mut self, rows: &[AircraftSnapshotRow]) -> OutputResult<()>;

    /// Write a batch of spoke snapshot rows.
    fn write_spokes(&mut self, rows: &[SpokeSnapshotRow]) -> OutputResult<()>;

    /// Write one period summary row.
    fn write_period_summary(&mut self, row: &PeriodSummaryRow) -> OutputResult<()>;

    fn write_incident(&mut self, row: &IncidentRow) -> OutputResult<()>;

    /// Write one row per batch run.
    fn write_run_records(&mut self, records: &[RunRecord]) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent; safe to call more than once and to keep writing after.
    fn finish(&mut self) -> OutputResult<()>;
}

/// `ops_by_spoke` as a single `;`-separated column.
pub(crate) fn join_ops(ops: &[u64]) -> String {
    ops.iter().map(u64::to_string).collect::<Vec<_>>().join(";")
}
