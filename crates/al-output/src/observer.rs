//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use al_core::Incident;
use al_sim::{PeriodSummary, RunSummary, SimObserver, Snapshot};

use crate::row::{IncidentRow, PeriodSummaryRow, snapshot_rows};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots, period summaries and incidents
/// to any [`OutputWriter`] backend (CSV, SQLite).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to append batch records after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_incident(&mut self, incident: &Incident) {
        let result = self.writer.write_incident(&IncidentRow::from(incident));
        self.store_err(result);
    }

    fn on_period_end(&mut self, summary: &PeriodSummary) {
        let result = self.writer.write_period_summary(&PeriodSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let (aircraft, spokes) = snapshot_rows(snapshot);
        let result = self.writer.write_aircraft(&aircraft);
        self.store_err(result);
        let result = self.writer.write_spokes(&spokes);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
