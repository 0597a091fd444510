pub mod check;
pub mod evaluate;
pub mod validate;

use std::str::FromStr;

use finderscan_common::config::AppConfig;
use finderscan_common::error::FinderscanError;
use finderscan_platform_core::HostPlatform;

/// Parse `x,y,width,height`.
pub fn parse_finder(raw: &str) -> Result<[f64; 4], String> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid finder component '{}': {e}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    <[f64; 4]>::try_from(values.as_slice())
        .map_err(|_| format!("expected x,y,width,height but got {} values", values.len()))
}

/// Resolve the platform from the CLI flag, then config, then the build target.
pub fn resolve_platform(config: &AppConfig, flag: Option<&str>) -> anyhow::Result<HostPlatform> {
    match flag.or(config.scanner.platform.as_deref()) {
        Some(name) => HostPlatform::from_str(name)
            .map_err(|e| FinderscanError::platform(e.to_string()).into()),
        None => Ok(HostPlatform::current()),
    }
}

/// Pixel ratios must be positive and finite.
pub fn check_pixel_ratio(ratio: f64) -> anyhow::Result<f64> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(FinderscanError::config(format!("pixel ratio must be positive, got {ratio}")).into())
    }
}
