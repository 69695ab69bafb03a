// Adapters layer: concrete output sinks for estimates.

pub mod console;

pub use console::{ConsoleSink, OutputFormat};
