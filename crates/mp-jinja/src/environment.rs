//! Template set compilation and rendering for mailpeek

use crate::context::MockContext;
use crate::error::{JinjaError, JinjaResult, RenderError, RenderErrorKind};
use crate::functions::Helpers;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use mp_core::{Catalog, TemplateSource};

/// Every template source compiled into one environment.
///
/// Each source section registers under its internal name, so `{% extends
/// "base" %}` and `{% include %}` resolve across files. Building is
/// all-or-nothing: a single malformed source fails the whole set.
pub struct TemplateSet {
    env: Environment<'static>,
    names: Vec<String>,
}

impl TemplateSet {
    /// Compile `sources` into a template set.
    ///
    /// Helpers are registered before any source is added. The first parse
    /// failure aborts the build and is reported with its file name.
    pub fn build<'s>(
        sources: impl IntoIterator<Item = &'s TemplateSource>,
        helpers: &Helpers,
    ) -> JinjaResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        helpers.register(&mut env);

        let mut names: Vec<String> = Vec::new();
        for source in sources {
            for (name, body) in source.sections() {
                if names.iter().any(|n| n == name) {
                    log::warn!(
                        "Template name '{}' is defined again in {}; the later definition wins",
                        name,
                        source.file_name
                    );
                } else {
                    names.push(name.to_string());
                }
                env.add_template_owned(name.to_string(), body.to_string())
                    .map_err(|e| JinjaError::CompileError {
                        source_file: source.file_name.clone(),
                        message: describe(&e),
                    })?;
            }
        }

        log::debug!("Compiled template set with {} names", names.len());
        Ok(Self { env, names })
    }

    /// Compile every source in a catalog, layouts included
    pub fn from_catalog(catalog: &Catalog, helpers: &Helpers) -> JinjaResult<Self> {
        Self::build(catalog.sources(), helpers)
    }

    /// Internal names defined in the set, in registration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Render the template registered as `name` against `context`.
    ///
    /// Output is fully buffered; nothing is returned on failure. A name that
    /// is not registered is [`RenderErrorKind::NameNotFound`]; any failure
    /// after lookup (undefined field, helper misuse, missing layout) is
    /// [`RenderErrorKind::Execute`].
    pub fn render(&self, name: &str, context: &MockContext) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| self.render_error(name, RenderErrorKind::NameNotFound, &e))?;

        template
            .render(context)
            .map_err(|e| self.render_error(name, RenderErrorKind::Execute, &e))
    }

    fn render_error(
        &self,
        name: &str,
        kind: RenderErrorKind,
        err: &minijinja::Error,
    ) -> RenderError {
        RenderError {
            requested: name.to_string(),
            available: self.names.clone(),
            kind,
            message: describe(err),
        }
    }
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet")
            .field("names", &self.names)
            .finish()
    }
}

/// Engine error text followed by its cause chain
fn describe(err: &minijinja::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str("\ncaused by: ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
