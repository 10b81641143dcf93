//! Autolube controller — main entry point.
//!
//! Hexagonal architecture around a single blocking decision loop:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ReaderClient    JsonCartStore   LogEventSink   DecisionLog    │
//! │  (TagScanner)    (CartStore)     (EventSink)    (EventSink)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  scan · fuzzy inference · threshold · cart record      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gate loop polls the PLC status flag once per second; a rising
//! edge triggers one scan/decision cycle.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use autolube::adapters::decision_log::DecisionLog;
use autolube::adapters::json_store::JsonCartStore;
use autolube::adapters::log_sink::LogEventSink;
use autolube::adapters::sim::{MemoryCartStore, ScriptedScanner, SimRegisterBus};
use autolube::app::ports::{RegisterPort, TagScanner, TeeSink};
use autolube::app::service::AppService;
use autolube::config::SystemConfig;
use autolube::control::rules::read_rule_file;
use autolube::protocol::{Classification, ReaderClient, ReaderEndpoint};

/// Fuzzy-logic lubrication controller for RFID-gated cart stations.
#[derive(Debug, Parser)]
#[command(name = "autolube", version, about)]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the reader host.
    #[arg(long)]
    host: Option<String>,

    /// Override the reader TCP port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the scan timeout in seconds.
    #[arg(long)]
    scan_timeout: Option<u64>,

    /// Override the rule table CSV path.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Override the cart record directory.
    #[arg(long)]
    cart_dir: Option<PathBuf>,

    /// Bench mode: scripted reader and in-memory registers instead of
    /// live hardware. Core algorithms are unaffected.
    #[arg(long)]
    sim: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // ── 1. Configuration ──────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => SystemConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SystemConfig::default(),
    };
    if let Some(host) = cli.host {
        config.reader_host = host;
    }
    if let Some(port) = cli.port {
        config.reader_port = port;
    }
    if let Some(secs) = cli.scan_timeout {
        config.scan_timeout_secs = secs;
    }
    if let Some(rules) = cli.rules {
        config.rules_path = rules;
    }
    if let Some(dir) = cli.cart_dir {
        config.cart_dir = dir;
    }

    info!("autolube v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Rule table + inference engine ──────────────────────
    let rows = read_rule_file(&config.rules_path)
        .with_context(|| format!("loading rules from {}", config.rules_path.display()))?;
    let engine = config.build_engine(&rows).context("building fuzzy engine")?;
    info!(
        "engine ready: {} rules over '{}'",
        engine.rules().len(),
        engine.output_domain().name()
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let store = JsonCartStore::new(config.cart_dir.clone());
    let mut console = LogEventSink::new();
    let mut decisions = DecisionLog::new(config.event_log_dir.clone());

    // ── 4. Service + decision loop ────────────────────────────
    let gate_interval = Duration::from_millis(config.gate_poll_interval_ms);

    if cli.sim {
        // Bench smoke run: one scripted cycle against in-memory ports,
        // then exit. Exercises the full scan → infer → persist path.
        info!("bench mode: scripted reader, in-memory registers");
        let mut scanner = ScriptedScanner::new(vec![
            Classification::NoTag,
            Classification::NoTag,
            Classification::Tag(17),
        ]);
        let mut registers = SimRegisterBus::new();
        let bench_store = MemoryCartStore::new();
        let now = chrono::Local::now().naive_local();
        bench_store.insert(
            17,
            autolube::cart::CartRecord {
                cart_id: 17,
                last_scan_ts: now - chrono::Duration::hours(5),
                last_lub_ts: now - chrono::Duration::hours(72),
                last_lub_dur_ms: 1000,
            },
        );
        let mut service = AppService::new(config, engine);
        let mut sink = TeeSink(&mut console, &mut decisions);
        match service.run_cycle(&mut scanner, &bench_store, &mut registers, &mut sink) {
            Ok(Some(decision)) => info!(
                "bench cycle: cart {} -> {} ms",
                decision.cart_id, decision.dispense_ms
            ),
            Ok(None) => info!("bench cycle: timed out"),
            Err(e) => error!("bench cycle failed: {e}"),
        }
        return Ok(());
    }

    let addr = resolve(&config.reader_host, config.reader_port)?;
    let endpoint = ReaderEndpoint::new(
        addr,
        Duration::from_millis(config.connect_timeout_ms),
        Duration::from_millis(config.read_timeout_ms),
    );
    let mut scanner = ReaderClient::new(endpoint, config.inventory_command.clone());
    // TODO: wire the plant's register gateway adapter once its endpoint
    // is provisioned for this station; until then writes land in-memory.
    let mut registers = SimRegisterBus::new();
    warn!("no register bridge configured: PLC I/O is in-memory");

    let mut service = AppService::new(config, engine);
    info!("system ready, entering gate loop");
    run_loop(
        &mut service,
        &mut scanner,
        &store,
        &mut registers,
        &mut console,
        &mut decisions,
        gate_interval,
    );
    Ok(())
}

/// Gate loop: poll the status flag, run one cycle per rising edge.
/// Cycle failures are logged and the loop keeps going.
fn run_loop(
    service: &mut AppService,
    scanner: &mut impl TagScanner,
    store: &JsonCartStore,
    registers: &mut impl RegisterPort,
    console: &mut LogEventSink,
    decisions: &mut DecisionLog,
    gate_interval: Duration,
) {
    loop {
        let mut sink = TeeSink(&mut *console, &mut *decisions);
        if service.gate_opened(registers, &mut sink) {
            match service.run_cycle(scanner, store, registers, &mut sink) {
                Ok(Some(decision)) => {
                    info!(
                        "cycle complete: cart {} -> {} ms",
                        decision.cart_id, decision.dispense_ms
                    );
                }
                Ok(None) => {
                    info!("cycle complete: scan timed out, fallback applied");
                }
                Err(e) => {
                    error!("cycle failed: {e}");
                }
            }
        }
        std::thread::sleep(gate_interval);
    }
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .with_context(|| format!("resolving {host}:{port}"))?
        .next()
        .with_context(|| format!("no address for {host}:{port}"))
}
