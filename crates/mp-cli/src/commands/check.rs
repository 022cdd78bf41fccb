//! Check command implementation - compile and render every template

use anyhow::{Context, Result};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::{load_previewer, ExitCode};

/// Execute the check command
pub async fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let previewer = load_previewer(global)?;
    let catalog = previewer.scan().context("Failed to scan templates")?;

    let set = match previewer.template_set(&catalog) {
        Ok(set) => set,
        Err(e) => {
            println!("  ✗ compile: {}", e);
            println!("\nTemplate set failed to compile");
            return Err(ExitCode(1).into());
        }
    };
    println!(
        "Compiled {} templates from {} files",
        set.names().len(),
        catalog.len()
    );

    let mut passed = 0;
    let mut failed = 0;
    let mut warnings = 0;

    'sources: for source in catalog.renderable() {
        for name in &source.defined_names {
            match set.render(name, previewer.context()) {
                Ok(html) => {
                    passed += 1;
                    log::debug!("{} rendered {} bytes", name, html.len());
                    println!("  ✓ {} ({})", name, source.file_name);
                }
                Err(e) => {
                    failed += 1;
                    println!("  ✗ {} ({}): {}", name, source.file_name, e.message);
                    if args.fail_fast {
                        break 'sources;
                    }
                }
            }
        }

        let resolved = previewer.aliases().resolve(&source.stem);
        if !set.contains(resolved) {
            warnings += 1;
            println!(
                "  ! {} is listed but '{}' resolves to no template; add an alias",
                source.file_name, source.stem
            );
        }
    }

    println!(
        "\nChecked: {} passed, {} failed, {} warnings",
        passed, failed, warnings
    );

    if failed > 0 {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
