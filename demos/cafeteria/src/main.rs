//! cafeteria: one run of the self-service cafeteria model.
//!
//! Usage: `cafeteria [CONFIG.json] [OUTPUT_DIR]`
//!
//! Without a config file the reference parameters are used: two employees
//! per counter, two drink machines, 50 seats, four hours of arrivals.  Any
//! field missing from the JSON file keeps its default.  Set `RUST_LOG` to
//! change the log level (default `info`).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cafe_core::{ProcessId, RunConfig, SimTime};
use cafe_model::{CafeObserver, QueueId, RunSummary, SimulationBuilder, Stage};
use cafe_output::{CsvWriter, OutputWriter, SimOutputObserver};

const DEFAULT_OUTPUT_DIR: &str = "output/cafeteria";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:      SimOutputObserver<W>,
    queue_rows: usize,
    stage_rows: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, queue_rows: 0, stage_rows: 0 }
    }
}

impl<W: OutputWriter> CafeObserver for CountingObserver<W> {
    fn on_queue_length(&mut self, time: SimTime, queue: QueueId, len: usize) {
        self.queue_rows += 1;
        self.inner.on_queue_length(time, queue, len);
    }

    fn on_stage(&mut self, time: SimTime, customer: ProcessId, stage: Stage) {
        self.stage_rows += 1;
        self.inner.on_stage(time, customer, stage);
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        self.inner.on_run_end(summary);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let config = load_config(config_path.as_deref())?;
    info!(
        seed = config.seed,
        seats = config.seats,
        drink_machines = config.drink_machines,
        stop_at = ?config.stop_at,
        "configuration loaded",
    );

    // 1. Build the run.
    let mut sim = SimulationBuilder::new(config).build()?;

    // 2. Set up output.
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 3. Run.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("=== cafeteria ===");
    let (h, m, secs) = summary.final_time.hms();
    println!("Simulated {h:02}:{m:02}:{secs:06.3} in {:.3} s wall time", elapsed.as_secs_f64());
    println!("  activations          : {}", summary.events_processed);
    println!("  customers arrived    : {}", summary.customers_arrived);
    println!("  customers left       : {}", summary.customers_left);
    println!("  waiting at stop      : {}", summary.customers_waiting);
    println!("  in service at stop   : {}", summary.customers_in_service);
    println!("  queue_lengths.csv    : {} rows", obs.queue_rows);
    println!("  customer_stages.csv  : {} rows", obs.stage_rows);
    println!();

    println!(
        "{:<18} {:>5} {:>7} {:>10} {:>10} {:>7} {:>6} {:>5} {:>8}",
        "Station", "Cap", "Served", "Mean wait", "Max wait", "Mean q", "Max q", "Idle", "Waiting"
    );
    println!("{}", "-".repeat(84));
    for s in &summary.stations {
        println!(
            "{:<18} {:>5} {:>7} {:>10.1} {:>10.1} {:>7.2} {:>6} {:>5} {:>8}",
            s.station.name(),
            s.capacity,
            s.served,
            s.mean_wait,
            s.max_wait,
            s.mean_queue,
            s.max_queue,
            s.idle,
            s.waiting.len(),
        );
    }

    Ok(())
}
