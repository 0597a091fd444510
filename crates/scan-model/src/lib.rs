//! finderscan scan model
//!
//! Data contracts exchanged between the scanning engine, the geometry
//! filter and the host:
//! - **Events:** decoded payload plus bounds in rect or point-cloud form
//! - **Coordinates:** explicit coercion of loosely typed numeric fields
//! - **Finder:** the region a code must lie within
//! - **Gate:** caller-owned suppression flags

pub mod coord;
pub mod event;
pub mod finder;
pub mod gate;

pub use coord::*;
pub use event::*;
pub use finder::*;
pub use gate::*;
