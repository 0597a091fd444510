//! Replay a detection stream through the geometry filter.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use finderscan_common::config::AppConfig;
use finderscan_common::error::FinderscanError;
use finderscan_filter_engine::{select_filter, BarcodeReader, GeometryFilter, Verdict};
use finderscan_platform_core::FixedPixelDensity;
use finderscan_scan_model::{parse_events, FinderRegion, GateState};

use super::{check_pixel_ratio, resolve_platform};

pub struct EvaluateArgs {
    pub path: PathBuf,
    pub finder: Option<[f64; 4]>,
    pub platform: Option<String>,
    pub pixel_ratio: Option<f64>,
    pub unfocused: bool,
    pub already_read: bool,
    pub once: bool,
}

pub fn run(config: &AppConfig, args: EvaluateArgs) -> anyhow::Result<()> {
    if !args.path.exists() {
        return Err(FinderscanError::FileNotFound { path: args.path }.into());
    }
    let content = std::fs::read_to_string(&args.path)?;
    let events = parse_events(&content)?;

    let platform = resolve_platform(config, args.platform.as_deref())?;
    let ratio = check_pixel_ratio(args.pixel_ratio.unwrap_or(config.scanner.pixel_ratio))?;
    let filter = select_filter(platform, Arc::new(FixedPixelDensity(ratio)))?;

    let finder = match args.finder {
        Some([x, y, width, height]) => FinderRegion::new(x, y, width, height),
        None => {
            let f = config.scanner.finder;
            FinderRegion::new(f.x, f.y, f.width, f.height)
        }
    };

    tracing::info!(
        path = %args.path.display(),
        events = events.len(),
        filter = filter.name(),
        pixel_ratio = ratio,
        "Replaying detections"
    );

    // This command plays the host: it owns the gate and, with --once,
    // closes it after the first accepted code.
    let mut gate = GateState::new(args.already_read, !args.unfocused);
    let mut accepted = Vec::new();
    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut reader = BarcodeReader::new(filter.as_ref(), |data: &str| {
        accepted.push(data.to_string())
    });

    for (index, event) in events.iter().enumerate() {
        let verdict = reader.on_barcode_read(event, &finder, gate);
        *tally.entry(verdict.as_str()).or_default() += 1;
        tracing::debug!(index, verdict = verdict.as_str(), "Evaluated detection");
        if args.once && verdict == Verdict::Accepted {
            gate.already_read = true;
        }
    }
    drop(reader);

    for data in &accepted {
        println!("{data}");
    }

    eprintln!();
    eprintln!(
        "{} detections, {} accepted ({} filter, finder {},{} {}x{})",
        events.len(),
        accepted.len(),
        filter.name(),
        finder.x,
        finder.y,
        finder.width,
        finder.height
    );
    for (verdict, count) in &tally {
        eprintln!("  {verdict}: {count}");
    }

    Ok(())
}
