pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use domain::{CatalogItem, ChatResult, EstimationContext, PartListing, SetSummary, Theme};
pub use errors::CatalogError;
