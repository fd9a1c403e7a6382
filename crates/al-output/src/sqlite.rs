//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! five tables: `aircraft_snapshots`, `spoke_snapshots`, `period_summaries`,
//! `incidents` and `run_records`.

use std::path::Path;

use rusqlite::{Connection, params};

use al_sim::RunRecord;

use crate::writer::{OutputWriter, join_ops};
use crate::{AircraftSnapshotRow, IncidentRow, OutputResult, PeriodSummaryRow, SpokeSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS aircraft_snapshots (
                 period      INTEGER NOT NULL,
                 aircraft_id INTEGER NOT NULL,
                 type        TEXT    NOT NULL,
                 state       TEXT    NOT NULL,
                 x           REAL    NOT NULL,
                 y           REAL    NOT NULL,
                 heading     REAL    NOT NULL,
                 cargo       INTEGER NOT NULL,
                 legs_flown  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS spoke_snapshots (
                 period      INTEGER NOT NULL,
                 spoke_id    INTEGER NOT NULL,
                 a           INTEGER NOT NULL,
                 b           INTEGER NOT NULL,
                 c           INTEGER NOT NULL,
                 d           INTEGER NOT NULL,
                 operational INTEGER NOT NULL,
                 ops_total   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS period_summaries (
                 period             INTEGER PRIMARY KEY,
                 day                INTEGER NOT NULL,
                 phase              TEXT    NOT NULL,
                 stage              TEXT    NOT NULL,
                 deliveries         INTEGER NOT NULL,
                 upkeep_paid        INTEGER NOT NULL,
                 shortages          INTEGER NOT NULL,
                 ops_run            INTEGER NOT NULL,
                 assignments        INTEGER NOT NULL,
                 fallbacks          INTEGER NOT NULL,
                 incidents          INTEGER NOT NULL,
                 operational_spokes INTEGER NOT NULL,
                 cumulative_ops     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS incidents (
                 period INTEGER NOT NULL,
                 kind   TEXT    NOT NULL,
                 detail TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_records (
                 run                INTEGER PRIMARY KEY,
                 seed               INTEGER NOT NULL,
                 periods            INTEGER NOT NULL,
                 total_ops          INTEGER NOT NULL,
                 operational_spokes INTEGER NOT NULL,
                 shortages          INTEGER NOT NULL,
                 assignments        INTEGER NOT NULL,
                 fallbacks          INTEGER NOT NULL,
                 incidents          INTEGER NOT NULL,
                 ops_by_spoke       TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_aircraft(&mut self, rows: &[AircraftSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO aircraft_snapshots \
                 (period, aircraft_id, type, state, x, y, heading, cargo, legs_flown) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.period as i64,
                    row.aircraft_id,
                    row.type_tag,
                    row.state,
                    row.x,
                    row.y,
                    row.heading,
                    row.cargo,
                    row.legs_flown,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_spokes(&mut self, rows: &[SpokeSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO spoke_snapshots \
                 (period, spoke_id, a, b, c, d, operational, ops_total) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.period as i64,
                    row.spoke_id,
                    row.a,
                    row.b,
                    row.c,
                    row.d,
                    row.operational as i64,
                    row.ops_total as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_period_summary(&mut self, row: &PeriodSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO period_summaries \
             (period, day, phase, stage, deliveries, upkeep_paid, shortages, ops_run, \
              assignments, fallbacks, incidents, operational_spokes, cumulative_ops) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                row.period as i64,
                row.day as i64,
                row.phase,
                row.stage,
                row.deliveries as i64,
                row.upkeep_paid,
                row.shortages,
                row.ops_run,
                row.assignments as i64,
                row.fallbacks,
                row.incidents as i64,
                row.operational_spokes as i64,
                row.cumulative_ops as i64,
            ],
        )?;
        Ok(())
    }

    fn write_incident(&mut self, row: &IncidentRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO incidents (period, kind, detail) VALUES (?1, ?2, ?3)",
            params![row.period as i64, row.kind, row.detail],
        )?;
        Ok(())
    }

    fn write_run_records(&mut self, records: &[RunRecord]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO run_records \
                 (run, seed, periods, total_ops, operational_spokes, shortages, \
                  assignments, fallbacks, incidents, ops_by_spoke) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for r in records {
                stmt.execute(params![
                    r.run,
                    r.seed as i64,
                    r.periods as i64,
                    r.total_ops as i64,
                    r.operational_spokes as i64,
                    r.shortages as i64,
                    r.assignments as i64,
                    r.fallbacks,
                    r.incidents,
                    join_ops(&r.ops_by_spoke),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
