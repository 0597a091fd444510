use finderscan_platform_core::HostPlatform;
use finderscan_scan_model::{BarcodeBounds, FinderRegion};

use crate::backend::{GeometryFilter, Verdict};

/// Rect-form filter used on iOS.
///
/// Bounds arrive as origin + size already in the finder's coordinate space,
/// so they are compared as-is. The whole rectangle must fit; touching an
/// edge is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseRectFilter;

impl PreciseRectFilter {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryFilter for PreciseRectFilter {
    fn name(&self) -> &'static str {
        "precise_rect"
    }

    fn platform(&self) -> HostPlatform {
        HostPlatform::Ios
    }

    fn check_bounds(&self, bounds: &BarcodeBounds, finder: &FinderRegion) -> Verdict {
        let BarcodeBounds::Rect(rect) = bounds else {
            return Verdict::UnsupportedBounds;
        };

        let (x, y, width, height) = rect.values();
        if finder.contains_rect(x, y, width, height) {
            Verdict::Accepted
        } else {
            Verdict::OutsideFinder
        }
    }
}
