#![forbid(unsafe_code)]

//! Service layer for the mental-arithmetic drill: configuration and catalog
//! loading, exercise sampling, and the timed session runtime.

pub mod catalog;
pub mod config;
pub mod error;
pub mod sampler;
pub mod sessions;

pub use catalog::{CatalogService, CatalogSource};
pub use config::{ConfigService, ConfigSource};
pub use error::{CatalogError, CatalogSourceError, ConfigSourceError};
