//! headless: runs the airlift simulator without a renderer.
//!
//! Simulates the mixed C-130 / C-27 fleet over a ten-spoke ring for 30 days,
//! writes per-period CSV output, then runs a small seed batch of the same
//! scenario and appends one record per run.  Set `RUST_LOG=debug` to see
//! every dispatch decision.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use al_core::{Incident, Period};
use al_output::{CsvWriter, OutputWriter, SimOutputObserver};
use al_sim::{PeriodSummary, RunSummary, Scenario, SimBuilder, SimObserver, Snapshot, run_batch};

// ── Constants ─────────────────────────────────────────────────────────────────

const SCENARIO:   Scenario = Scenario::MixedFleet;
const SEED:       u64      = 42;
const SIM_DAYS:   u64      = 30;
const BATCH_RUNS: u32      = 8;
const OUTPUT_DIR: &str     = "output/headless";

// ── Logging ───────────────────────────────────────────────────────────────────

/// `RUST_LOG` filter, `info` when unset.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    incidents:     usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, incidents: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_period_start(&mut self, period: Period) {
        self.inner.on_period_start(period);
    }

    fn on_incident(&mut self, incident: &Incident) {
        self.incidents += 1;
        self.inner.on_incident(incident);
    }

    fn on_period_end(&mut self, summary: &PeriodSummary) {
        self.summary_rows += 1;
        if summary.period.is_pm() {
            info!(
                day = summary.period.day(),
                ops = summary.cumulative_ops,
                operational = summary.operational,
                "day complete"
            );
        }
        self.inner.on_period_end(summary);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshot_rows += snapshot.aircraft.len() + snapshot.spokes.len();
        self.inner.on_snapshot(snapshot);
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        self.inner.on_sim_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    println!("=== headless: airlift hub-and-spoke simulator ===");
    let mut config = SCENARIO.config();
    config.seed = SEED;
    config.periods = SIM_DAYS * 2;
    println!(
        "Scenario: {SCENARIO}  |  Spokes: {}  |  Aircraft: {}  |  Days: {SIM_DAYS}  |  Seed: {SEED}",
        config.spoke_count(),
        config.fleet_size()
    );
    println!();

    // 1. Build sim.
    let mut sim = SimBuilder::new(config.clone()).build()?;

    // 2. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 3. Run.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs);
    let elapsed = t0.elapsed();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  snapshot rows       : {}", obs.snapshot_rows);
    println!("  period_summaries.csv: {} rows", obs.summary_rows);
    println!("  incidents.csv       : {} rows", obs.incidents);
    println!();

    // 4. Final spoke table.
    println!("{:<6} {:>3} {:>3} {:>3} {:>3} {:>6} {:>10}", "Spoke", "A", "B", "C", "D", "Ops", "Shortages");
    println!("{}", "-".repeat(42));
    for s in sim.ledger().spokes() {
        let [a, b, c, d] = s.stock.0;
        println!("{:<6} {a:>3} {b:>3} {c:>3} {d:>3} {:>6} {:>10}", format!("S{}", s.id.0 + 1), s.ops_total, s.shortages);
    }
    println!();

    // 5. Fleet status.
    for ac in sim.fleet().aircraft() {
        println!(
            "{:<10} {:<16} sorties {:>3}  legs {:>3}",
            ac.name,
            ac.state.as_str(),
            ac.sorties_total,
            ac.legs_flown
        );
    }
    println!();

    // 6. Seed batch, appended to run_records.csv.
    let t0 = Instant::now();
    let records = run_batch(SCENARIO, BATCH_RUNS, SEED)?;
    let mut writer = obs.inner.into_writer();
    writer.write_run_records(&records)?;
    writer.finish()?;
    let mean = records.iter().map(|r| r.total_ops as f64).sum::<f64>() / records.len().max(1) as f64;
    println!(
        "Batch: {} runs in {:.3} s, mean ops {:.1}",
        records.len(),
        t0.elapsed().as_secs_f64(),
        mean
    );
    println!();

    // 7. Summary as JSON for downstream tooling.
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
