//! Detection events delivered by the upstream scanning engine.
//!
//! One [`DetectionEvent`] describes a single located-and-decoded code in a
//! video frame. Streams of events can be recorded as JSONL (one object per
//! line) and replayed through a geometry filter.

use finderscan_common::error::{FinderscanError, FinderscanResult};
use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// A single detection report from the scanning engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Decoded payload, opaque to the filter.
    pub data: String,

    /// Where the code was located in the frame.
    pub bounds: BarcodeBounds,

    /// Symbology tag (e.g. "QR_CODE", "org.iso.QRCode").
    #[serde(rename = "type", default)]
    pub symbology: String,
}

/// Bounds payload in one of the two shapes platforms deliver.
///
/// Deserialized by shape: an `origin` array selects [`PointCloudBounds`],
/// an `origin` object with a `size` selects [`RectBounds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarcodeBounds {
    PointCloud(PointCloudBounds),
    Rect(RectBounds),
}

/// Which shape a bounds payload has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundsShape {
    Rect,
    PointCloud,
}

/// A point with coerced coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default = "Coord::missing")]
    pub x: Coord,
    #[serde(default = "Coord::missing")]
    pub y: Coord,
}

/// A size with coerced dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSize {
    #[serde(default = "Coord::missing")]
    pub width: Coord,
    #[serde(default = "Coord::missing")]
    pub height: Coord,
}

/// Axis-aligned rect form: `{origin:{x,y}, size:{width,height}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectBounds {
    pub origin: RawPoint,
    pub size: RawSize,
}

/// Corner point form: `{origin:[point...], width, height}`.
///
/// Points are in device pixels. `width`/`height` describe the frame and are
/// not used for containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudBounds {
    pub origin: Vec<RawPoint>,
    #[serde(default = "Coord::missing")]
    pub width: Coord,
    #[serde(default = "Coord::missing")]
    pub height: Coord,
}

impl RawPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Coord::new(x),
            y: Coord::new(y),
        }
    }
}

impl RectBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: RawPoint::new(x, y),
            size: RawSize {
                width: Coord::new(width),
                height: Coord::new(height),
            },
        }
    }

    /// `(x, y, width, height)` as coerced values.
    pub fn values(&self) -> (f64, f64, f64, f64) {
        (
            self.origin.x.value(),
            self.origin.y.value(),
            self.size.width.value(),
            self.size.height.value(),
        )
    }
}

impl PointCloudBounds {
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>, width: f64, height: f64) -> Self {
        Self {
            origin: points
                .into_iter()
                .map(|(x, y)| RawPoint::new(x, y))
                .collect(),
            width: Coord::new(width),
            height: Coord::new(height),
        }
    }

    /// Corner points as coerced `(x, y)` values, in device pixels.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.origin.iter().map(|p| (p.x.value(), p.y.value()))
    }
}

impl BarcodeBounds {
    pub fn shape(&self) -> BoundsShape {
        match self {
            Self::Rect(_) => BoundsShape::Rect,
            Self::PointCloud(_) => BoundsShape::PointCloud,
        }
    }

    /// Whether every coordinate that takes part in containment is finite.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Rect(rect) => {
                rect.origin.x.is_valid()
                    && rect.origin.y.is_valid()
                    && rect.size.width.is_valid()
                    && rect.size.height.is_valid()
            }
            Self::PointCloud(cloud) => cloud
                .origin
                .iter()
                .all(|p| p.x.is_valid() && p.y.is_valid()),
        }
    }
}

impl DetectionEvent {
    /// Create an event with rect-form bounds.
    pub fn rect(data: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            data: data.into(),
            bounds: BarcodeBounds::Rect(RectBounds::new(x, y, width, height)),
            symbology: String::new(),
        }
    }

    /// Create an event with point-cloud bounds (device pixels). The frame
    /// size is left unset.
    pub fn point_cloud(data: impl Into<String>, points: &[(f64, f64)]) -> Self {
        Self {
            data: data.into(),
            bounds: BarcodeBounds::PointCloud(PointCloudBounds::new(
                points.iter().copied(),
                f64::NAN,
                f64::NAN,
            )),
            symbology: String::new(),
        }
    }

    /// Set the symbology tag.
    pub fn with_symbology(mut self, symbology: impl Into<String>) -> Self {
        self.symbology = symbology.into();
        self
    }
}

/// Parse events from JSONL content (one JSON object per line).
///
/// Blank lines and `#` comments are skipped. The error names the 1-based
/// line of the first malformed event.
pub fn parse_events(jsonl: &str) -> FinderscanResult<Vec<DetectionEvent>> {
    jsonl
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|e| FinderscanError::parse(line_no, e.to_string()))
        })
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[DetectionEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
