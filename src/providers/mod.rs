//! Provider catalog, form schema and destination URL building.
//!
//! - `catalog` - provider registry and field descriptors
//! - `regions` - fixed AWS region list
//! - `schema` - discriminated form validation
//! - `url` - destination locator and JSON descriptor

pub mod catalog;
pub mod regions;
pub mod schema;
pub mod url;

pub use catalog::{FieldConfig, ProviderCatalog, ProviderDefinition, ProviderEntry, SelectOption};
pub use regions::{AWS_REGIONS, DEFAULT_AWS_REGION};
pub use schema::{validate, FieldErrors, ProviderFormValues, ValidatedForm};
pub use url::{build_destination_json, build_destination_url, normalize_path, DestinationDescriptor};
