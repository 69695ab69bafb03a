pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{ConsoleSink, OutputFormat};
pub use crate::config::SiteConfig;
pub use crate::core::{
    calculator::Calculator,
    contact::{ContactForm, ContactRequest},
    estimator::{estimate, PriceEstimator},
    links::FloatingLinks,
    render::format_thousands,
};
pub use crate::domain::model::{BuildingType, EstimateRequest, EstimateResult, FormInput, PriceCatalog};
pub use crate::utils::error::{CalcError, Result};
