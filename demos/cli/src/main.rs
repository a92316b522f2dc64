use std::path::{Path, PathBuf};

use amr_core::{Dashboard, DashboardConfig, DashboardPhase, DashboardView, PartialConfig};
use amr_csv::load_records_path;
use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "amr-cli",
    about = "Tóm tắt dashboard kháng kháng sinh từ file CSV mẫu phân lập."
)]
struct Args {
    /// Đường dẫn tới file CSV.
    #[arg(short, long)]
    input: PathBuf,

    /// File TOML ghi đè cấu hình mặc định (kháng sinh, gen MDRO, tên cột).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lọc theo loại bệnh phẩm (dropdown).
    #[arg(long)]
    specimen: Option<String>,

    #[arg(long)]
    gender: Option<String>,

    #[arg(long)]
    outcome: Option<String>,

    /// Cross-filter theo loại bệnh phẩm, ưu tiên hơn `--specimen`.
    #[arg(long)]
    cross_filter: Option<String>,

    /// In toàn bộ view (KPI, biểu đồ, figure Plotly) dạng JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };

    let outcome = load_records_path(&args.input, &config);
    let mut dashboard = Dashboard::new(config);
    dashboard.complete_load(outcome);
    if let DashboardPhase::Error { message, detail } = dashboard.phase() {
        bail!("{message} ({detail})");
    }

    dashboard.set_specimen_dropdown(args.specimen.as_deref());
    dashboard.set_gender(args.gender.as_deref());
    dashboard.set_outcome(args.outcome.as_deref());
    if let Some(specimen) = args.cross_filter.as_deref() {
        dashboard.toggle_cross_filter(specimen);
    }

    let view = dashboard.view().context("Dashboard chưa sẵn sàng")?;
    info!(
        filtered = view.kpis.total,
        total = dashboard.records().len(),
        "filters applied"
    );

    if args.json {
        let figures = view.figures();
        let output = serde_json::json!({ "view": view, "figures": figures });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&view);
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<DashboardConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được file cấu hình {path:?}"))?;
    let partial: PartialConfig =
        toml::from_str(&text).with_context(|| format!("Cấu hình không hợp lệ {path:?}"))?;
    Ok(DashboardConfig::from(partial))
}

fn print_summary(view: &DashboardView) {
    println!(
        "Total isolates: {}\nAverage resistance: {}\nMDRO isolates: {}",
        view.kpi_text.total, view.kpi_text.resistance_rate, view.kpi_text.mdro_count
    );
    if !view.displayed_specimen.is_empty() {
        println!("Specimen filter: {}", view.displayed_specimen);
    }
    for (surface, chart) in view.charts.iter() {
        let state = if chart.is_empty() { "no data" } else { "ok" };
        println!("[{}] {} ({state})", surface.element_id(), chart.title());
    }
}
