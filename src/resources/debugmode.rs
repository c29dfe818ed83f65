//! Debug toggle resource.
//!
//! Present while debug overlays and the entity inspector are enabled.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may draw overlays or log extra
/// diagnostics.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
