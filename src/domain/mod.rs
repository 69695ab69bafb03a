// Domain layer: the estimator's data model and the ports its adapters implement.

pub mod model;
pub mod ports;
