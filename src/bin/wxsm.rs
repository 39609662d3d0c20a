use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use wxsm_rs::{AppState, DashboardConfig, Metric};
use wxsm_rs::{combine, config, stats, storage, viz};

#[derive(Parser, Debug)]
#[command(
    name = "wxsm",
    version,
    about = "Render monthly weather small multiples (precipitation vs. temperature)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the dashboard (.html) or a single metric (.svg).
    Render(RenderArgs),
    /// Aggregate per-city daily CSVs into the monthly table.
    Combine(CombineArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Combined monthly CSV (city, year, month, actual_* columns).
    #[arg(short, long)]
    data: PathBuf,
    /// Output path; `.svg` writes one metric, anything else the HTML dashboard.
    #[arg(short, long)]
    out: PathBuf,
    /// Metric to show (mean, min, max). For HTML this is the initially selected view.
    #[arg(short, long, default_value = "mean")]
    metric: Metric,
    /// JSON file overriding layout settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Locale for tick labels (e.g., en, de).
    #[arg(long)]
    locale: Option<String>,
    /// Print per-city statistics of the metric to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Also dump the projected scene as JSON.
    #[arg(long)]
    scene_json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CombineArgs {
    /// Daily CSV files, one per city; the file stem is the city code.
    #[arg(short, long, num_args = 1.., required = true)]
    inputs: Vec<PathBuf>,
    /// Output file.
    #[arg(short, long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 2 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Combine(args) => cmd_combine(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut cfg = match args.config.as_ref() {
        Some(path) => config::load_config(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(locale) = args.locale {
        cfg.locale = locale;
    }

    let records = storage::load_csv(&args.data)?;
    let state = AppState::new(args.metric);

    let kind = viz::plot_to_path(&records, &args.out, &state, &cfg)?;
    eprintln!("Wrote {:?} to {}", kind, args.out.display());

    if let Some(path) = args.scene_json.as_ref() {
        let scene = viz::project(&records, &state, &cfg)?;
        fs::write(path, serde_json::to_string_pretty(&scene)?)?;
        eprintln!("Wrote scene to {}", path.display());
    }

    if args.stats {
        for s in stats::city_summary(&records, args.metric) {
            println!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                s.city,
                s.metric,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}

fn cmd_combine(args: CombineArgs) -> Result<()> {
    let records = combine::combine_files(&args.inputs)?;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args.out.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&records, &args.out)?,
        "json" => storage::save_json(&records, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", records.len(), args.out.display());
    Ok(())
}
