use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use xr_triage::api::PredictClient;
use xr_triage::preview::Preview;
use xr_triage::settings::Settings;
use xr_triage::triage::{Phase, TriageController};
use xr_triage::types::DisplayGeometry;

/// Submit an X-ray image to the detection backend and print the triage
/// verdict with its display-space overlay boxes.
#[derive(Debug, Parser)]
#[command(name = "xr_triage", version)]
struct Args {
    /// Image file to analyze.
    image: Option<PathBuf>,

    /// Confidence threshold in 0..1 (defaults to the configured value).
    #[arg(long)]
    conf: Option<f64>,

    /// Backend base URL (defaults to the configured value).
    #[arg(long)]
    api_base: Option<String>,

    /// Display width the overlay is mapped to.
    #[arg(long, default_value_t = 800.0)]
    display_w: f64,

    /// Display height the overlay is mapped to.
    #[arg(long, default_value_t = 800.0)]
    display_h: f64,

    /// Probe the backend health endpoint and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::load();

    let base = args.api_base.unwrap_or_else(|| settings.api_base.clone());
    let client = PredictClient::new(&base, Duration::from_secs(settings.request_timeout_secs))?;

    if args.check {
        client.health().await?;
        println!("backend ok: {base}");
        return Ok(());
    }

    let image = args
        .image
        .context("an image file is required unless --check is given")?;
    let preview = Preview::from_path(&image)?;
    println!(
        "{} ({}x{} px)",
        preview.name(),
        preview.width(),
        preview.height()
    );

    let controller = TriageController::new(client);
    controller.set_threshold(args.conf.unwrap_or(settings.default_confidence));
    controller.attach_file(preview);
    controller.activate();

    let result = match controller.settled().await {
        Phase::Succeeded(result) => result,
        Phase::Failed(message) => anyhow::bail!("analysis failed: {message}"),
        other => anyhow::bail!("analysis never ran (phase {other:?})"),
    };

    println!("verdict: {}", controller.status_label());
    if let Some(confidence) = controller.display_confidence() {
        println!("confidence: {confidence}%");
    }
    if !result.summary.types.is_empty() {
        println!("types: {}", result.summary.types.join(", "));
    }

    let geometry = DisplayGeometry::new(args.display_w, args.display_h);
    let boxes = controller.overlay_boxes(geometry);
    println!(
        "{} detection(s) above threshold at {}x{}:",
        boxes.len(),
        args.display_w,
        args.display_h
    );
    for b in &boxes {
        println!(
            "  {:<24} left={:.1} top={:.1} w={:.1} h={:.1}",
            b.label, b.left, b.top, b.width, b.height
        );
    }

    Ok(())
}
