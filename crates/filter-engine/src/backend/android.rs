use std::sync::Arc;

use finderscan_platform_core::{to_logical, HostPlatform, PixelDensity};
use finderscan_scan_model::{BarcodeBounds, FinderRegion};

use crate::backend::{GeometryFilter, Verdict};

/// Corner-point filter used on Android.
///
/// Bounds arrive as corner points in device pixels. Each point is divided
/// by the current pixel ratio and must land inside the finder, edges
/// included.
///
/// Only corners are checked, not the polygon they span: a code that
/// overlaps the finder with any corner outside is rejected, however much of
/// it lies inside. An empty point list passes.
pub struct PointCloudFilter {
    density: Arc<dyn PixelDensity>,
}

impl PointCloudFilter {
    pub fn new(density: Arc<dyn PixelDensity>) -> Self {
        Self { density }
    }
}

impl GeometryFilter for PointCloudFilter {
    fn name(&self) -> &'static str {
        "point_cloud"
    }

    fn platform(&self) -> HostPlatform {
        HostPlatform::Android
    }

    fn check_bounds(&self, bounds: &BarcodeBounds, finder: &FinderRegion) -> Verdict {
        let BarcodeBounds::PointCloud(cloud) = bounds else {
            return Verdict::UnsupportedBounds;
        };

        let ratio = self.density.ratio();
        let inside = cloud
            .points()
            .map(|(x, y)| to_logical(x, y, ratio))
            .all(|(x, y)| finder.contains_point(x, y));

        if inside {
            Verdict::Accepted
        } else {
            Verdict::OutsideFinder
        }
    }
}
