// Domain layer: API contracts, view-model nodes and ports. No HTTP or IO here.

pub mod model;
pub mod ports;
pub mod view;
