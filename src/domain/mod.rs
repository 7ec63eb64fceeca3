// Domain layer: run states and the greeting port.

pub mod model;
pub mod ports;
