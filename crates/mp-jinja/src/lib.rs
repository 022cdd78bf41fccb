//! mp-jinja - Jinja templating layer for mailpeek
//!
//! This crate compiles every discovered email template into one shared
//! [`TemplateSet`] with the helper functions templates expect (`L.Ts()`,
//! `RootURL()`, `LogoURL()`, `Safe()`, `ToUpper()`, `ToLower()`, `eq()`,
//! `ne()`, `Date()`, `UnixTime()`), renders templates against a synthetic
//! [`MockContext`], and drives the per-request preview pipeline that falls
//! back to a catalog listing when a name is unknown.

pub mod cache;
pub mod context;
pub mod environment;
pub mod error;
pub mod functions;
pub mod pages;
pub mod preview;

pub use cache::SetCache;
pub use context::MockContext;
pub use environment::TemplateSet;
pub use error::{JinjaError, JinjaResult, RenderError, RenderErrorKind};
pub use functions::Helpers;
pub use pages::{diagnostic_page, error_page, listing_page};
pub use preview::{PreviewOutcome, Previewer};
