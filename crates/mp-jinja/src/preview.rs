//! Per-request preview pipeline.
//!
//! ```text
//! identifier ── empty ──────────────────────────────► Listing
//!     │
//!     └─ resolve alias ─► build set ─► render ─┬─ ok ─────────► Rendered
//!                            │                 ├─ not found ──► Listing
//!                            │                 └─ execute ────► Diagnostic
//!                            └─ parse error ──────────────────► CompileFailed
//! ```
//!
//! A template directory that cannot be scanned ends every request in
//! `CatalogUnavailable`.

use crate::cache::SetCache;
use crate::context::MockContext;
use crate::environment::TemplateSet;
use crate::error::{JinjaError, JinjaResult, RenderError};
use crate::functions::Helpers;
use crate::pages::{diagnostic_page, error_page, listing_page};
use mp_core::error::CoreResult;
use mp_core::{AliasTable, Catalog, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Terminal state of one preview request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The template rendered
    Rendered { name: String, html: String },
    /// Catalog listing; `missing` holds the internal name that was not found
    Listing {
        missing: Option<String>,
        html: String,
    },
    /// A known template failed while executing
    Diagnostic { error: RenderError, html: String },
    /// A template source failed to parse; nothing is renderable
    CompileFailed { message: String, html: String },
    /// Template sources could not be enumerated
    CatalogUnavailable { message: String, html: String },
}

impl PreviewOutcome {
    /// HTTP status code for this outcome
    pub fn status(&self) -> u16 {
        match self {
            PreviewOutcome::Rendered { .. } | PreviewOutcome::Listing { .. } => 200,
            PreviewOutcome::Diagnostic { .. }
            | PreviewOutcome::CompileFailed { .. }
            | PreviewOutcome::CatalogUnavailable { .. } => 500,
        }
    }

    /// HTML body for this outcome
    pub fn body(&self) -> &str {
        match self {
            PreviewOutcome::Rendered { html, .. }
            | PreviewOutcome::Listing { html, .. }
            | PreviewOutcome::Diagnostic { html, .. }
            | PreviewOutcome::CompileFailed { html, .. }
            | PreviewOutcome::CatalogUnavailable { html, .. } => html,
        }
    }

    /// Consume the outcome, returning its HTML body
    pub fn into_body(self) -> String {
        match self {
            PreviewOutcome::Rendered { html, .. }
            | PreviewOutcome::Listing { html, .. }
            | PreviewOutcome::Diagnostic { html, .. }
            | PreviewOutcome::CompileFailed { html, .. }
            | PreviewOutcome::CatalogUnavailable { html, .. } => html,
        }
    }

    /// Whether this outcome is an error page
    pub fn is_error(&self) -> bool {
        self.status() >= 500
    }
}

/// Runs preview requests against one project.
///
/// Holds only read-only configuration plus the optional set cache, so it
/// can be shared across request handlers behind an `Arc`.
pub struct Previewer {
    config: Config,
    root: PathBuf,
    aliases: AliasTable,
    helpers: Helpers,
    context: MockContext,
    cache: Option<SetCache>,
}

impl Previewer {
    /// Create a previewer for the project at `root`. Caching follows
    /// `config.cache`.
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        let aliases = AliasTable::from(&config.aliases);
        let helpers = Helpers::from_config(&config);
        let context = MockContext::build(&helpers);
        let cache = config.cache.then(SetCache::new);
        Self {
            config,
            root: root.into(),
            aliases,
            helpers,
            context,
            cache,
        }
    }

    /// Enable or disable the template set cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(SetCache::new);
        self
    }

    /// Project configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Alias table built from configuration
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Synthetic render context shared by every request
    pub fn context(&self) -> &MockContext {
        &self.context
    }

    /// Whether compiled sets are reused across requests
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Scan the template directory
    pub fn scan(&self) -> CoreResult<Catalog> {
        Catalog::scan(&self.config, &self.root)
    }

    /// Compile the catalog, reusing the cached set when enabled
    pub fn template_set(&self, catalog: &Catalog) -> JinjaResult<Arc<TemplateSet>> {
        match &self.cache {
            Some(cache) => cache.get_or_build(catalog, &self.helpers),
            None => TemplateSet::from_catalog(catalog, &self.helpers).map(Arc::new),
        }
    }

    /// Run one request for an external identifier
    pub fn handle(&self, external_id: &str) -> PreviewOutcome {
        let catalog = match self.scan() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("{}", e);
                let message = e.to_string();
                return PreviewOutcome::CatalogUnavailable {
                    html: error_page("Template catalog unavailable", &message),
                    message,
                };
            }
        };

        if external_id.is_empty() {
            return PreviewOutcome::Listing {
                missing: None,
                html: self.listing(&catalog),
            };
        }

        let name = self.aliases.resolve(external_id);
        log::debug!("Resolved '{}' to template '{}'", external_id, name);

        let set = match self.template_set(&catalog) {
            Ok(set) => set,
            Err(e) => return self.build_failure(e),
        };

        match set.render(name, &self.context) {
            Ok(html) => {
                log::info!("Rendered '{}' ({} bytes)", name, html.len());
                PreviewOutcome::Rendered {
                    name: name.to_string(),
                    html,
                }
            }
            Err(error) if error.is_not_found() => {
                log::info!("No template named '{}', showing listing", name);
                PreviewOutcome::Listing {
                    missing: Some(name.to_string()),
                    html: self.listing(&catalog),
                }
            }
            Err(error) => {
                log::warn!("{}", error);
                PreviewOutcome::Diagnostic {
                    html: diagnostic_page(&error),
                    error,
                }
            }
        }
    }

    fn listing(&self, catalog: &Catalog) -> String {
        listing_page(catalog.sources(), self.config.route_prefix())
    }

    fn build_failure(&self, err: JinjaError) -> PreviewOutcome {
        log::error!("{}", err);
        let message = err.to_string();
        PreviewOutcome::CompileFailed {
            html: error_page("Template compile error", &message),
            message,
        }
    }
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
