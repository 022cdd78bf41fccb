//! Template catalog: discovery of on-disk template sources
//!
//! A template source is a single file. It registers under its file stem
//! (`base.html` is `base`) unless it declares internal names with one or
//! more `{# define "name" #}` comments, in which case each marker opens a
//! section registered under the declared name.

use crate::checksum::compute_checksum;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A discovered, loadable unit of template markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// On-disk file name, e.g. `subscriber-optin-campaign.html`
    pub file_name: String,
    /// File name without extension
    pub stem: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Internal template names this file registers under
    pub defined_names: Vec<String>,
    /// Whether this file is a shared layout fragment
    pub is_layout: bool,
    /// Template markup
    pub content: String,
}

impl TemplateSource {
    /// Build a source from in-memory markup
    pub fn from_content(file_name: &str, content: impl Into<String>, is_layout: bool) -> Self {
        let content = content.into();
        let stem = file_stem(Path::new(file_name));
        let defined_names = defined_names(&content, &stem);
        Self {
            file_name: file_name.to_string(),
            stem,
            path: PathBuf::from(file_name),
            defined_names,
            is_layout,
            content,
        }
    }

    /// Read a source from disk
    pub fn load(path: &Path, is_layout: bool) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let mut source = Self::from_content(&file_name, content, is_layout);
        source.path = path.to_path_buf();
        Ok(source)
    }

    /// The markup registered under each defined name; see [`split_sections`]
    pub fn sections(&self) -> Vec<(&str, &str)> {
        split_sections(&self.content, &self.stem)
    }
}

/// Split template markup into `(name, body)` sections.
///
/// Each `{# define "name" #}` comment (whitespace-control dashes allowed)
/// opens a section that runs until the next marker or the end of the file.
/// Text before the first marker belongs to the first section. Markup with
/// no marker is one section named after the file stem.
pub fn split_sections<'a>(content: &'a str, stem: &'a str) -> Vec<(&'a str, &'a str)> {
    static DEFINE_PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    let pattern = DEFINE_PATTERN.get_or_init(|| {
        regex::Regex::new(r#"\{#-?\s*define\s+"([^"]+)"\s*-?#\}"#).expect("valid regex literal")
    });

    let markers: Vec<(usize, &str)> = pattern
        .captures_iter(content)
        .filter_map(|captures| {
            let start = captures.get(0)?.start();
            let name = captures.get(1)?.as_str().trim();
            (!name.is_empty()).then_some((start, name))
        })
        .collect();

    if markers.is_empty() {
        return vec![(stem, content)];
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, &(start, name))| {
            let from = if i == 0 { 0 } else { start };
            let to = markers.get(i + 1).map_or(content.len(), |&(next, _)| next);
            (name, &content[from..to])
        })
        .collect()
}

/// Internal names a source registers under, in first-declared order.
///
/// Falls back to the file stem when the file declares none.
pub fn defined_names(content: &str, stem: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in split_sections(content, stem) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// List template files matching a glob pattern, ordered by file name.
///
/// Directories matching the pattern are skipped. An invalid pattern or an
/// unreadable entry makes the whole catalog unavailable.
pub fn list_templates(pattern: &str) -> CoreResult<Vec<PathBuf>> {
    let unavailable = |reason: String| CoreError::CatalogUnavailable {
        pattern: pattern.to_string(),
        reason,
    };

    let entries = glob::glob(pattern).map_err(|e| unavailable(e.to_string()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| unavailable(e.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// All template sources discovered for a project
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sources: Vec<TemplateSource>,
}

impl Catalog {
    /// Create a catalog from already-loaded sources, keeping file-name order
    pub fn new(mut sources: Vec<TemplateSource>) -> Self {
        sources.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Self { sources }
    }

    /// Scan the configured template directory under `root`
    pub fn scan(config: &Config, root: &Path) -> CoreResult<Self> {
        let dir = config.template_dir_absolute(root);
        let pattern = config.template_pattern(root);
        if !dir.is_dir() {
            return Err(CoreError::CatalogUnavailable {
                pattern,
                reason: format!("template directory {} does not exist", dir.display()),
            });
        }

        let mut sources = Vec::new();
        for path in list_templates(&pattern)? {
            let is_layout = config.is_layout(&file_stem(&path));
            let source = TemplateSource::load(&path, is_layout).map_err(|e| {
                CoreError::CatalogUnavailable {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                }
            })?;
            sources.push(source);
        }
        log::debug!("Discovered {} template sources in {}", sources.len(), dir.display());
        Ok(Self { sources })
    }

    /// Every source, layouts included; this is what gets compiled
    pub fn sources(&self) -> &[TemplateSource] {
        &self.sources
    }

    /// Sources that can be previewed on their own (layouts excluded)
    pub fn renderable(&self) -> impl Iterator<Item = &TemplateSource> {
        self.sources.iter().filter(|s| !s.is_layout)
    }

    /// Find the source that registers `internal_name`
    pub fn source_defining(&self, internal_name: &str) -> Option<&TemplateSource> {
        self.sources
            .iter()
            .rev()
            .find(|s| s.defined_names.iter().any(|n| n == internal_name))
    }

    /// Content checksum over every source; changes when any file is
    /// added, removed, renamed, or edited
    pub fn checksum(&self) -> String {
        compute_checksum(
            self.sources
                .iter()
                .map(|s| (s.file_name.as_str(), s.content.as_str())),
        )
    }

    /// Number of sources, layouts included
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources were found
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
