// Domain layer: data model and ports (interfaces) for the Codacy API.

pub mod model;
pub mod ports;
