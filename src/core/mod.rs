pub mod calendar;
pub mod client;
pub mod form;
pub mod format;
pub mod registry;

pub use crate::domain::ports::{ConfigProvider, FormSource, Storage, View};
pub use crate::utils::error::Result;
