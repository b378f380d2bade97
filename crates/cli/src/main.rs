//! # bms-anomaly
//!
//! Command-line interface for the building telemetry anomaly pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anomaly_facade::{
    anomaly_count, fit, BandClassifier, BandConfigBuilder, DegeneratePolicy, PipelineType,
    ReadingClassifier,
};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use orchestrator::{
    infer_site, ingest_site, plan_sites, retrain_site, InvocationContext, PipelineSettings,
    RetrainOptions, ScheduledEvent,
};
use source_core::{CsvHistorySource, StaticCatalog};
use storage_core::{codec, LocalObjectStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bms-anomaly")]
#[command(about = "Per-point mean/std anomaly flagging for building telemetry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a parameter table from a raw readings table
    Fit {
        /// Raw readings CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the parameter CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Label raw readings against a parameter table
    Classify {
        /// Raw readings CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Parameter CSV produced by `fit`
        #[arg(short, long)]
        model: PathBuf,

        /// Where to write the classified CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Band half-width in standard deviations
        #[arg(long, default_value = "2.0")]
        multiplier: f64,

        /// Fail instead of leaving single-sample pairs unlabelled
        #[arg(long)]
        reject_degenerate: bool,
    },

    /// Expand a scheduler event into one invocation per site
    Plan {
        /// Event id, reused as the run's event id
        #[arg(long)]
        event_id: String,

        /// Identifier of the rule that fired
        #[arg(long)]
        rule: String,

        /// Catalog CSV (site_id,asset_name,asset_id,point_name,point_id)
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Fetch a site's history window into the data bucket
    Ingest {
        #[arg(long)]
        site: String,

        #[arg(long)]
        event: String,

        /// inference or retrain
        #[arg(long)]
        pipeline_type: PipelineType,

        /// History dump CSV in the raw readings layout
        #[arg(long)]
        history: PathBuf,

        /// Catalog CSV
        #[arg(long)]
        catalog: PathBuf,

        /// Window end in epoch seconds (default: now)
        #[arg(long)]
        end_time: Option<i64>,
    },

    /// Refit a site's model from the retrain raw table
    Retrain {
        #[arg(long)]
        site: String,

        #[arg(long)]
        event: String,

        /// Refuse to store a model with single-sample pairs
        #[arg(long)]
        reject_degenerate: bool,
    },

    /// Score a site's inference raw table and write one table per series
    Infer {
        #[arg(long)]
        site: String,

        #[arg(long)]
        event: String,

        /// Band half-width in standard deviations
        #[arg(long, default_value = "2.0")]
        multiplier: f64,
    },
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_file(path: &Path, body: &[u8]) -> anyhow::Result<()> {
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}

fn now_epoch_secs() -> anyhow::Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    Ok(elapsed.as_secs() as i64)
}

fn run_fit(input: &Path, output: &Path) -> anyhow::Result<()> {
    let readings = codec::decode_readings(&read_file(input)?)?;
    let params = fit(&readings)?;
    write_file(output, &codec::encode_parameters(&params)?)?;

    println!("Fitted {} (asset, point) pairs from {} readings", params.len(), readings.len());
    Ok(())
}

fn run_classify(
    input: &Path,
    model: &Path,
    output: &Path,
    multiplier: f64,
    reject_degenerate: bool,
) -> anyhow::Result<()> {
    let readings = codec::decode_readings(&read_file(input)?)?;
    let params = codec::decode_parameters(&read_file(model)?)?;

    let degenerate = if reject_degenerate {
        DegeneratePolicy::Reject
    } else {
        DegeneratePolicy::Indeterminate
    };
    let config = BandConfigBuilder::new()
        .multiplier(multiplier)
        .degenerate(degenerate)
        .build()?;
    let classified = BandClassifier::from_config(config)?.classify(&readings, &params)?;
    write_file(output, &codec::encode_classified(&classified)?)?;

    let json = serde_json::json!({
        "multiplier": multiplier,
        "total_points": classified.len(),
        "anomaly_count": anomaly_count(&classified),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn run_plan(event_id: String, rule: String, catalog: &Path) -> anyhow::Result<()> {
    let catalog = StaticCatalog::from_path(catalog)?;
    let event = ScheduledEvent::new(event_id, vec![rule]);
    let plan = plan_sites(&event, &catalog)?;

    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "data": plan }))?);
    Ok(())
}

fn run_ingest(
    ctx: InvocationContext,
    history: &Path,
    catalog: &Path,
    end_time: Option<i64>,
) -> anyhow::Result<()> {
    let settings = PipelineSettings::from_env()?;
    let store = LocalObjectStore::new(&settings.store_root);
    let catalog = StaticCatalog::from_path(catalog)?;
    let source = CsvHistorySource::from_path(history)?;
    let end_time = match end_time {
        Some(t) => t,
        None => now_epoch_secs()?,
    };

    let summary = ingest_site(&ctx, end_time, &catalog, &source, &store, &settings)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_retrain(ctx: InvocationContext, reject_degenerate: bool) -> anyhow::Result<()> {
    let settings = PipelineSettings::from_env()?;
    let store = LocalObjectStore::new(&settings.store_root);
    let builder = anomaly_facade::MeanStdBuilder::new();

    let pairs = retrain_site(
        &ctx,
        &builder,
        &store,
        &settings,
        RetrainOptions { reject_degenerate },
    )?;
    println!("Stored model for {} with {} (asset, point) pairs", ctx.site_id, pairs);
    Ok(())
}

fn run_infer(ctx: InvocationContext, multiplier: f64) -> anyhow::Result<()> {
    let settings = PipelineSettings::from_env()?;
    let store = LocalObjectStore::new(&settings.store_root);
    let classifier = BandClassifier::new(multiplier)?;

    let report = infer_site(&ctx, &classifier, &store, &settings)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_complete() {
        bail!(
            "{} of {} series could not be scored",
            report.failed.len(),
            report.failed.len() + report.succeeded.len()
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orchestrator=info,bms_anomaly=info".into()),
        )
        .init();

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "bms-anomaly starting");

    match cli.command {
        Commands::Fit { input, output } => run_fit(&input, &output),
        Commands::Classify {
            input,
            model,
            output,
            multiplier,
            reject_degenerate,
        } => run_classify(&input, &model, &output, multiplier, reject_degenerate),
        Commands::Plan {
            event_id,
            rule,
            catalog,
        } => run_plan(event_id, rule, &catalog),
        Commands::Ingest {
            site,
            event,
            pipeline_type,
            history,
            catalog,
            end_time,
        } => run_ingest(
            InvocationContext::new(site, event, pipeline_type),
            &history,
            &catalog,
            end_time,
        ),
        Commands::Retrain {
            site,
            event,
            reject_degenerate,
        } => run_retrain(
            InvocationContext::new(site, event, PipelineType::Retrain),
            reject_degenerate,
        ),
        Commands::Infer {
            site,
            event,
            multiplier,
        } => run_infer(InvocationContext::new(site, event, PipelineType::Inference), multiplier),
    }
}
