//! finderscan platform core contracts.
//!
//! Host platform identity and the pixel-density readings that geometry
//! filters consume, without coupling to a concrete mobile OS binding.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Host operating system family, as far as filter selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HostPlatform {
    Ios,
    Android,
    #[default]
    Unknown,
}

impl HostPlatform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "ios") {
            HostPlatform::Ios
        } else if cfg!(target_os = "android") {
            HostPlatform::Android
        } else {
            HostPlatform::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostPlatform::Ios => "ios",
            HostPlatform::Android => "android",
            HostPlatform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a platform name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown host platform '{}' (expected ios or android)", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for HostPlatform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(HostPlatform::Ios),
            "android" => Ok(HostPlatform::Android),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Source of the device's physical-to-logical pixel ratio.
///
/// Read on every evaluation; implementations must not assume the value is
/// cached by the caller.
pub trait PixelDensity: Send + Sync {
    /// Physical pixels per logical unit (for example 1.0, 2.0, 2.625).
    fn ratio(&self) -> f64;
}

/// A ratio that never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPixelDensity(pub f64);

impl PixelDensity for FixedPixelDensity {
    fn ratio(&self) -> f64 {
        self.0
    }
}

impl Default for FixedPixelDensity {
    fn default() -> Self {
        Self(1.0)
    }
}

/// A ratio the host can update while filters hold a handle to it.
///
/// Clones share the same value.
#[derive(Debug, Clone)]
pub struct SharedPixelDensity {
    bits: Arc<AtomicU64>,
}

impl SharedPixelDensity {
    pub fn new(ratio: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(ratio.to_bits())),
        }
    }

    /// Publish a new ratio, e.g. after the display configuration changed.
    pub fn set(&self, ratio: f64) {
        self.bits.store(ratio.to_bits(), Ordering::Relaxed);
    }
}

impl PixelDensity for SharedPixelDensity {
    fn ratio(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl<T: PixelDensity + ?Sized> PixelDensity for Arc<T> {
    fn ratio(&self) -> f64 {
        (**self).ratio()
    }
}

/// Convert device-pixel coordinates to logical units.
pub fn to_logical(pixel_x: f64, pixel_y: f64, ratio: f64) -> (f64, f64) {
    (pixel_x / ratio, pixel_y / ratio)
}
