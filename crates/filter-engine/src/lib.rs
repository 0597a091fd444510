//! finderscan filter engine
//!
//! Decides whether a detected code lies inside the on-screen finder and
//! forwards its payload to the host exactly once per qualifying detection.
//!
//! Two interpretations of detection bounds exist, one per host platform:
//! - **precise_rect** (iOS): origin + size compared directly, full
//!   containment required
//! - **point_cloud** (Android): corner points in device pixels, divided by
//!   the pixel ratio, every corner must lie inside
//!
//! One of them is selected at startup via [`select_filter`] or installed
//! process-wide with [`install_platform_filter`].

pub mod backend;
pub mod reader;

pub use backend::{
    install_host_filter, install_platform_filter, platform_filter, select_filter,
    GeometryFilter, PointCloudFilter, PreciseRectFilter, Verdict,
};
pub use reader::{BarcodeReader, ScanSession};
