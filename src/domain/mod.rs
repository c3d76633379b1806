// Domain layer: release records, sources, cache entries and the renderer/clock ports.

pub mod model;
pub mod ports;
