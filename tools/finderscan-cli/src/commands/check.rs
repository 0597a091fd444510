//! Show platform and filter selection.

use std::sync::Arc;

use finderscan_common::config::{config_file_path, AppConfig};
use finderscan_filter_engine::{select_filter, GeometryFilter};
use finderscan_platform_core::{FixedPixelDensity, HostPlatform};

use super::resolve_platform;

pub fn run(config: &AppConfig, platform: Option<String>) -> anyhow::Result<()> {
    println!("finderscan check");
    println!("{}", "=".repeat(50));

    println!("Config file: {}", config_file_path().display());
    println!("Build target platform: {}", HostPlatform::current());
    match &config.scanner.platform {
        Some(name) => println!("Configured platform: {name}"),
        None => println!("Configured platform: (none)"),
    }

    let resolved = resolve_platform(config, platform.as_deref())?;
    let ratio = config.scanner.pixel_ratio;
    println!("Pixel ratio: {ratio}");

    let finder = config.scanner.finder;
    println!(
        "Finder: x={} y={} width={} height={}",
        finder.x, finder.y, finder.width, finder.height
    );

    println!();
    match select_filter(resolved, Arc::new(FixedPixelDensity(ratio))) {
        Ok(filter) => {
            println!("[OK] Platform {resolved}: using '{}' filter", filter.name());
        }
        Err(e) => {
            println!("[WARN] Platform {resolved}: {e}");
            println!("       Pass --platform ios|android or set scanner.platform in the config.");
        }
    }

    Ok(())
}
