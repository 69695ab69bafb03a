pub mod batch;
pub mod calculator;
pub mod contact;
pub mod estimator;
pub mod links;
pub mod render;

pub use crate::domain::model::{BuildingType, EstimateRequest, EstimateResult, FormInput, PriceCatalog};
pub use crate::domain::ports::{ConfigProvider, EstimateSink};
pub use crate::utils::error::Result;
