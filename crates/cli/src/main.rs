use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use promdash_grafana::GrafanaClient;
use promdash_mcp::WebhookClient;
use promdash_metrics_source::PrometheusSource;
use promdash_protocol::ToolFailure;
use promdash_synth::{PromdashConfig, SynthOptions, Synthesizer};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "promdash")]
#[command(about = "Turn Prometheus metric names into Grafana dashboards", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (JSON or TOML); overrides PROMDASH_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Grafana base URL (overrides config and PROMDASH_GRAFANA_URL)
    #[arg(long, global = true)]
    grafana_url: Option<String>,

    /// Prometheus exposition URL (overrides config and PROMDASH_PROMETHEUS_URL)
    #[arg(long, global = true)]
    prometheus_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the metric exists, generate PromQL and upsert "Auto Dashboard: <metric>"
    Create(MetricArgs),

    /// Retitle a dashboard and append one panel
    Update(UpdateArgs),

    /// Find a dashboard UID by title
    Lookup(LookupArgs),

    /// Show exposition lines mentioning a metric
    Search(MetricArgs),

    /// Preview the PromQL generated for a metric (no network)
    Promql(MetricArgs),

    /// Print the raw Prometheus exposition
    Metrics,

    /// Upsert a single-panel dashboard under an explicit name
    Dashboard(DashboardArgs),

    /// Call an external workflow webhook with GET
    Webhook(WebhookArgs),

    /// Serve the MCP tools over stdio
    Serve,
}

#[derive(Args)]
struct MetricArgs {
    /// Prometheus metric name
    metric: String,
}

#[derive(Args)]
struct UpdateArgs {
    /// Dashboard UID
    #[arg(long)]
    uid: String,

    /// New dashboard title
    #[arg(long)]
    title: String,

    /// PromQL for the appended panel, used verbatim
    #[arg(long)]
    promql: String,

    /// Reject the save if the dashboard changed since it was fetched
    #[arg(long)]
    optimistic: bool,
}

#[derive(Args)]
struct LookupArgs {
    /// Dashboard title (or part of it)
    name: String,
}

#[derive(Args)]
struct DashboardArgs {
    /// Dashboard title
    name: String,

    /// PromQL for the panel (defaults to node CPU usage)
    #[arg(long)]
    promql: Option<String>,
}

#[derive(Args)]
struct WebhookArgs {
    /// Full webhook URL
    url: String,
}

fn build_synth(config: PromdashConfig) -> Result<Synthesizer<GrafanaClient, PrometheusSource>> {
    let options = SynthOptions {
        optimistic_updates: config.optimistic_updates,
    };
    let store = GrafanaClient::new(config.grafana).context("create Grafana client")?;
    let source = PrometheusSource::new(config.prometheus).context("create Prometheus client")?;
    Ok(Synthesizer::new(store, source, options))
}

/// A create whose save failed still prints all three report lines, on stderr.
async fn create_text(
    synth: &Synthesizer<GrafanaClient, PrometheusSource>,
    metric: &str,
) -> std::result::Result<String, ToolFailure> {
    let created = synth.create_for_metric(metric).await?;
    match &created.store {
        Ok(_) => Ok(created.to_string()),
        Err(failure) => Err(ToolFailure::new(failure.kind, created.to_string())),
    }
}

fn report(outcome: std::result::Result<String, ToolFailure>) -> Result<ExitCode> {
    match outcome {
        Ok(text) => {
            print_stdout(&text)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            log::debug!("{} failure", failure.kind);
            eprintln!("{failure}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config =
        PromdashConfig::load(cli.config.as_deref()).context("Failed to load promdash config")?;
    if let Some(url) = cli.grafana_url {
        config.grafana.base_url = url;
    }
    if let Some(url) = cli.prometheus_url {
        config.prometheus.url = url;
    }

    let outcome = match cli.command {
        Commands::Serve => {
            promdash_mcp::serve_stdio(config).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Promql(args) => {
            Ok(Synthesizer::<GrafanaClient, PrometheusSource>::plan(&args.metric).to_string())
        }
        Commands::Webhook(args) => {
            let client = WebhookClient::new(config.prometheus.timeout_ms)
                .context("create webhook client")?;
            client.trigger(&args.url).await
        }
        Commands::Create(args) => create_text(&build_synth(config)?, &args.metric).await,
        Commands::Update(args) => {
            config.optimistic_updates |= args.optimistic;
            build_synth(config)?
                .update_dashboard(&args.uid, &args.title, &args.promql)
                .await
                .map(|r| r.to_string())
        }
        Commands::Lookup(args) => build_synth(config)?
            .lookup_dashboard(&args.name)
            .await
            .map(|hit| format!("Dashboard found: {}, UID: {}", hit.title, hit.uid)),
        Commands::Search(args) => build_synth(config)?
            .search_metric(&args.metric)
            .await
            .map(|matches| matches.render()),
        Commands::Metrics => build_synth(config)?.fetch_exposition().await,
        Commands::Dashboard(args) => build_synth(config)?
            .create_named_dashboard(&args.name, args.promql.as_deref())
            .await
            .map(|r| r.to_string()),
    };
    report(outcome)
}
