//! `al-output`: simulation output writers for the airlift simulator.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                            |
//! |-----------|---------|----------------------------------------------------------|
//! | *(none)*  | CSV     | `aircraft_snapshots.csv`, `spoke_snapshots.csv`,         |
//! |           |         | `period_summaries.csv`, `incidents.csv`, `run_records.csv` |
//! | `sqlite`  | SQLite  | `output.db`                                              |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `al_sim::SimObserver`.  Batch
//! records are written directly with [`OutputWriter::write_run_records`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use al_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AircraftSnapshotRow, IncidentRow, PeriodSummaryRow, SpokeSnapshotRow, snapshot_rows};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
