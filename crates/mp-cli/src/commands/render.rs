//! Render command implementation

use anyhow::{Context, Result};
use mp_core::external_id_from_path;
use mp_jinja::PreviewOutcome;
use std::io::Write;

use crate::cli::{GlobalArgs, RenderArgs};
use crate::commands::common::{load_previewer, ExitCode};

/// Execute the render command
pub async fn execute(args: &RenderArgs, global: &GlobalArgs) -> Result<()> {
    let previewer = load_previewer(global)?;

    if args.show_context {
        let json = previewer
            .context()
            .to_json()
            .context("Failed to serialize render context")?;
        println!("{}", json);
        return Ok(());
    }

    let id = external_id_from_path(&args.identifier, "", &previewer.config().extension);
    let outcome = previewer.handle(&id);

    match &outcome {
        PreviewOutcome::Rendered { .. } => {}
        PreviewOutcome::Listing {
            missing: Some(name),
            ..
        } => {
            eprintln!("No template named '{}'.", name);
            let catalog = previewer.scan().context("Failed to scan templates")?;
            let known: Vec<&str> = catalog
                .renderable()
                .map(|s| s.file_name.as_str())
                .collect();
            eprintln!("Available templates: {}", known.join(", "));
            return Err(ExitCode(1).into());
        }
        PreviewOutcome::Listing { missing: None, .. } => {}
        PreviewOutcome::Diagnostic { error, .. } => {
            eprintln!("{}", error);
            if let Ok(catalog) = previewer.scan() {
                if let Some(source) = catalog.source_defining(&error.requested) {
                    eprintln!("Defined in: {}", source.path.display());
                }
            }
            return Err(ExitCode(1).into());
        }
        PreviewOutcome::CompileFailed { message, .. }
        | PreviewOutcome::CatalogUnavailable { message, .. } => {
            eprintln!("{}", message);
            return Err(ExitCode(1).into());
        }
    }

    let html = outcome.into_body();
    match &args.output {
        Some(path) => {
            std::fs::write(path, &html).with_context(|| format!("Failed to write {}", path))?;
            println!("Wrote {} ({} bytes)", path, html.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
