use std::sync::{Arc, OnceLock};

use finderscan_common::error::{FinderscanError, FinderscanResult};
use finderscan_platform_core::{HostPlatform, PixelDensity};
use finderscan_scan_model::{BarcodeBounds, DetectionEvent, FinderRegion, GateState};

/// Outcome of evaluating one detection event.
///
/// Only [`Verdict::Accepted`] corresponds to an invocation of the accept
/// callback; every other variant had no observable effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The code lies inside the finder; the callback ran once.
    Accepted,
    /// Gate flags were closed (unfocused or already read).
    Suppressed,
    /// The geometry did not pass containment (including NaN coordinates).
    OutsideFinder,
    /// The bounds had the shape this filter does not consume.
    UnsupportedBounds,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::Suppressed => "suppressed",
            Verdict::OutsideFinder => "outside_finder",
            Verdict::UnsupportedBounds => "unsupported_bounds",
        }
    }
}

/// Platform-specific interpretation of detection bounds.
///
/// Implementations are stateless: the result depends only on the arguments
/// (and, for point clouds, the current pixel-density reading).
pub trait GeometryFilter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Platform this filter was built for.
    fn platform(&self) -> HostPlatform;

    /// Containment test without gating. Returns `Accepted`,
    /// `OutsideFinder` or `UnsupportedBounds`.
    fn check_bounds(&self, bounds: &BarcodeBounds, finder: &FinderRegion) -> Verdict;

    /// Gate, test, and invoke `on_accept` with the payload at most once.
    fn evaluate(
        &self,
        event: &DetectionEvent,
        finder: &FinderRegion,
        gate: GateState,
        on_accept: &mut dyn FnMut(&str),
    ) -> Verdict {
        if !gate.is_open() {
            tracing::trace!(
                filter = self.name(),
                already_read = gate.already_read,
                is_focused = gate.is_focused,
                "Detection suppressed by gate"
            );
            return Verdict::Suppressed;
        }

        let verdict = self.check_bounds(&event.bounds, finder);
        match verdict {
            Verdict::Accepted => {
                tracing::debug!(
                    filter = self.name(),
                    symbology = %event.symbology,
                    "Detection inside finder"
                );
                on_accept(&event.data);
            }
            other => {
                tracing::trace!(
                    filter = self.name(),
                    verdict = other.as_str(),
                    shape = ?event.bounds.shape(),
                    "Detection dropped"
                );
            }
        }
        verdict
    }
}

pub mod android;
pub mod ios;

pub use android::PointCloudFilter;
pub use ios::PreciseRectFilter;

/// Build the filter for `platform`.
///
/// `density` is only consulted by the point-cloud filter, and only at
/// evaluation time.
pub fn select_filter(
    platform: HostPlatform,
    density: Arc<dyn PixelDensity>,
) -> FinderscanResult<Box<dyn GeometryFilter>> {
    let filter: Box<dyn GeometryFilter> = match platform {
        HostPlatform::Ios => Box::new(PreciseRectFilter::new()),
        HostPlatform::Android => Box::new(PointCloudFilter::new(density)),
        HostPlatform::Unknown => {
            return Err(FinderscanError::unsupported(
                "no geometry filter for this host platform (expected ios or android)",
            ))
        }
    };
    tracing::info!(%platform, filter = filter.name(), "Selected geometry filter");
    Ok(filter)
}

static PLATFORM_FILTER: OnceLock<Box<dyn GeometryFilter>> = OnceLock::new();

/// Select and install the process-wide filter.
///
/// The first successful call wins. Later calls return the installed filter
/// unchanged, whatever platform they ask for.
pub fn install_platform_filter(
    platform: HostPlatform,
    density: Arc<dyn PixelDensity>,
) -> FinderscanResult<&'static dyn GeometryFilter> {
    if let Some(existing) = PLATFORM_FILTER.get() {
        if existing.platform() != platform {
            tracing::warn!(
                installed = %existing.platform(),
                requested = %platform,
                "Geometry filter already installed; ignoring re-selection"
            );
        }
        return Ok(existing.as_ref());
    }

    let filter = select_filter(platform, density)?;
    Ok(PLATFORM_FILTER.get_or_init(|| filter).as_ref())
}

/// Install the filter for the platform this binary targets.
pub fn install_host_filter(
    density: Arc<dyn PixelDensity>,
) -> FinderscanResult<&'static dyn GeometryFilter> {
    install_platform_filter(HostPlatform::current(), density)
}

/// The installed process-wide filter, if any.
pub fn platform_filter() -> Option<&'static dyn GeometryFilter> {
    PLATFORM_FILTER.get().map(|filter| filter.as_ref())
}

#[cfg(test)]
mod tests {
    use finderscan_platform_core::FixedPixelDensity;

    use super::*;

    fn density(ratio: f64) -> Arc<dyn PixelDensity> {
        Arc::new(FixedPixelDensity(ratio))
    }

    #[test]
    fn selects_precise_rect_for_ios() {
        let filter = select_filter(HostPlatform::Ios, density(3.0)).unwrap();
        assert_eq!(filter.name(), "precise_rect");
        assert_eq!(filter.platform(), HostPlatform::Ios);
    }

    #[test]
    fn selects_point_cloud_for_android() {
        let filter = select_filter(HostPlatform::Android, density(3.0)).unwrap();
        assert_eq!(filter.name(), "point_cloud");
        assert_eq!(filter.platform(), HostPlatform::Android);
    }

    #[test]
    fn unknown_platform_has_no_filter() {
        let err = select_filter(HostPlatform::Unknown, density(1.0)).err();
        assert!(matches!(err, Some(FinderscanError::Unsupported { .. })));
    }

    #[test]
    fn closed_gate_skips_containment() {
        let filter = PreciseRectFilter::new();
        let finder = FinderRegion::new(10.0, 10.0, 100.0, 100.0);
        let event = DetectionEvent::rect("payload", 20.0, 20.0, 50.0, 50.0);
        let mut calls = 0;

        for gate in [
            GateState::new(true, true),
            GateState::new(false, false),
            GateState::new(true, false),
        ] {
            let verdict = filter.evaluate(&event, &finder, gate, &mut |_| calls += 1);
            assert_eq!(verdict, Verdict::Suppressed);
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn accept_invokes_callback_once_with_payload() {
        let filter = PreciseRectFilter::new();
        let finder = FinderRegion::new(10.0, 10.0, 100.0, 100.0);
        let event = DetectionEvent::rect("payload", 20.0, 20.0, 50.0, 50.0);
        let mut seen = Vec::new();

        let verdict = filter.evaluate(&event, &finder, GateState::open(), &mut |data| {
            seen.push(data.to_string())
        });
        assert!(verdict.is_accepted());
        assert_eq!(seen, vec!["payload".to_string()]);
    }
}
