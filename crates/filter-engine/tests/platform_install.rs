//! The process-wide filter is global state, so everything touching it lives
//! in this single test binary and a single test.

use std::sync::Arc;

use finderscan_filter_engine::{install_platform_filter, platform_filter, GeometryFilter};
use finderscan_platform_core::{FixedPixelDensity, HostPlatform, PixelDensity};

#[test]
fn first_installed_filter_is_kept_for_the_process() {
    let density: Arc<dyn PixelDensity> = Arc::new(FixedPixelDensity(2.0));

    assert!(platform_filter().is_none());
    assert!(install_platform_filter(HostPlatform::Unknown, density.clone()).is_err());
    assert!(platform_filter().is_none());

    let installed = install_platform_filter(HostPlatform::Android, density.clone()).unwrap();
    assert_eq!(installed.name(), "point_cloud");

    let again = install_platform_filter(HostPlatform::Ios, density).unwrap();
    assert_eq!(again.name(), "point_cloud");
    assert_eq!(again.platform(), HostPlatform::Android);

    assert_eq!(platform_filter().map(|f| f.name()), Some("point_cloud"));
}
