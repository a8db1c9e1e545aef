pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{storage::LocalStorage, view::MemoryView};
pub use app::calculators::{CalcContext, Calculator, ErrorDisplay};
pub use crate::core::{client::ApiClient, registry::CalculatorRegistry};
pub use utils::error::{CalcError, Result};
