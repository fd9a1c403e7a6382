//! CSV output backend.
//!
//! Creates five files in the configured output directory:
//! - `aircraft_snapshots.csv`
//! - `spoke_snapshots.csv`
//! - `period_summaries.csv`
//! - `incidents.csv`
//! - `run_records.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use al_sim::RunRecord;

use crate::writer::{OutputWriter, join_ops};
use crate::{AircraftSnapshotRow, IncidentRow, OutputResult, PeriodSummaryRow, SpokeSnapshotRow};

pub const AIRCRAFT_HEADER: [&str; 9] =
    ["period", "aircraft_id", "type", "state", "x", "y", "heading", "cargo", "legs_flown"];
pub const SPOKE_HEADER: [&str; 8] = ["period", "spoke_id", "a", "b", "c", "d", "operational", "ops_total"];
pub const SUMMARY_HEADER: [&str; 13] = [
    "period", "day", "phase", "stage", "deliveries", "upkeep_paid", "shortages", "ops_run",
    "assignments", "fallbacks", "incidents", "operational_spokes", "cumulative_ops",
];
pub const INCIDENT_HEADER: [&str; 3] = ["period", "kind", "detail"];
pub const RUN_HEADER: [&str; 10] = [
    "run", "seed", "periods", "total_ops", "operational_spokes", "shortages", "assignments",
    "fallbacks", "incidents", "ops_by_spoke",
];

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    aircraft:  Writer<File>,
    spokes:    Writer<File>,
    summaries: Writer<File>,
    incidents: Writer<File>,
    runs:      Writer<File>,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let open = |name: &str, header: &[&str]| -> OutputResult<Writer<File>> {
            let mut w = Writer::from_path(dir.join(name))?;
            w.write_record(header)?;
            Ok(w)
        };
        Ok(Self {
            aircraft:  open("aircraft_snapshots.csv", &AIRCRAFT_HEADER)?,
            spokes:    open("spoke_snapshots.csv", &SPOKE_HEADER)?,
            summaries: open("period_summaries.csv", &SUMMARY_HEADER)?,
            incidents: open("incidents.csv", &INCIDENT_HEADER)?,
            runs:      open("run_records.csv", &RUN_HEADER)?,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_aircraft(&mut self, rows: &[AircraftSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.aircraft.write_record(&[
                row.period.to_string(),
                row.aircraft_id.to_string(),
                row.type_tag.clone(),
                row.state.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                format!("{:.4}", row.heading),
                row.cargo.to_string(),
                row.legs_flown.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_spokes(&mut self, rows: &[SpokeSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.spokes.write_record(&[
                row.period.to_string(),
                row.spoke_id.to_string(),
                row.a.to_string(),
                row.b.to_string(),
                row.c.to_string(),
                row.d.to_string(),
                (row.operational as u8).to_string(),
                row.ops_total.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_period_summary(&mut self, row: &PeriodSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.period.to_string(),
            row.day.to_string(),
            row.phase.to_string(),
            row.stage.to_string(),
            row.deliveries.to_string(),
            row.upkeep_paid.to_string(),
            row.shortages.to_string(),
            row.ops_run.to_string(),
            row.assignments.to_string(),
            row.fallbacks.to_string(),
            row.incidents.to_string(),
            row.operational_spokes.to_string(),
            row.cumulative_ops.to_string(),
        ])?;
        Ok(())
    }

    fn write_incident(&mut self, row: &IncidentRow) -> OutputResult<()> {
        self.incidents
            .write_record([row.period.to_string().as_str(), row.kind, row.detail.as_str()])?;
        Ok(())
    }

    fn write_run_records(&mut self, records: &[RunRecord]) -> OutputResult<()> {
        for r in records {
            self.runs.write_record(&[
                r.run.to_string(),
                r.seed.to_string(),
                r.periods.to_string(),
                r.total_ops.to_string(),
                r.operational_spokes.to_string(),
                r.shortages.to_string(),
                r.assignments.to_string(),
                r.fallbacks.to_string(),
                r.incidents.to_string(),
                join_ops(&r.ops_by_spoke),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.aircraft.flush()?;
        self.spokes.flush()?;
        self.summaries.flush()?;
        self.incidents.flush()?;
        self.runs.flush()?;
        Ok(())
    }
}
