//! mp-core - Core library for mailpeek
//!
//! This crate provides the preview configuration (`mailpeek.yml`), the
//! template catalog scanner, the alias table that maps request identifiers
//! to internal template names, and the translation dictionary consumed by
//! the `L.Ts()` template helper.

pub mod alias;
pub mod catalog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod translations;

pub use alias::{external_id_from_path, AliasTable};
pub use catalog::{list_templates, Catalog, TemplateSource};
pub use checksum::compute_checksum;
pub use config::{Config, ServerConfig};
pub use error::CoreError;
pub use translations::Translations;
