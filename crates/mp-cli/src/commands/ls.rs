//! List command implementation

use anyhow::{Context, Result};
use mp_core::{AliasTable, TemplateSource};
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_previewer;

/// One catalog entry as shown by `mailpeek ls`
#[derive(Debug, Serialize)]
struct TemplateInfo {
    file_name: String,
    defined_names: Vec<String>,
    aliases: Vec<String>,
    is_layout: bool,
    /// Whether the listing link (the file stem) resolves to a defined name
    reachable: bool,
}

impl TemplateInfo {
    fn new(source: &TemplateSource, aliases: &AliasTable) -> Self {
        let resolved = aliases.resolve(&source.stem);
        Self {
            file_name: source.file_name.clone(),
            defined_names: source.defined_names.clone(),
            aliases: source
                .defined_names
                .iter()
                .flat_map(|name| aliases.aliases_of(name))
                .map(String::from)
                .collect(),
            is_layout: source.is_layout,
            reachable: source.defined_names.iter().any(|n| n == resolved),
        }
    }
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let previewer = load_previewer(global)?;
    let catalog = previewer.scan().context("Failed to scan templates")?;

    let infos: Vec<TemplateInfo> = catalog
        .sources()
        .iter()
        .filter(|s| args.all || !s.is_layout)
        .map(|s| TemplateInfo::new(s, previewer.aliases()))
        .collect();

    match args.output {
        LsOutput::Json => {
            let json = serde_json::to_string_pretty(&infos).context("Failed to serialize")?;
            println!("{}", json);
        }
        LsOutput::Table => print_table(&infos),
    }
    Ok(())
}

fn print_table(infos: &[TemplateInfo]) {
    if infos.is_empty() {
        println!("No templates found.");
        return;
    }

    let file_width = infos
        .iter()
        .map(|i| i.file_name.len())
        .max()
        .unwrap_or(0)
        .max("FILE".len());
    let names_width = infos
        .iter()
        .map(|i| i.defined_names.join(", ").len())
        .max()
        .unwrap_or(0)
        .max("DEFINES".len());

    println!(
        "{:<fw$}  {:<nw$}  ALIASES",
        "FILE",
        "DEFINES",
        fw = file_width,
        nw = names_width
    );
    for info in infos {
        let mut aliases = info.aliases.join(", ");
        if info.is_layout {
            aliases = "(layout)".to_string();
        } else if !info.reachable {
            aliases.push_str(if aliases.is_empty() {
                "(needs alias)"
            } else {
                " (needs alias)"
            });
        }
        println!(
            "{:<fw$}  {:<nw$}  {}",
            info.file_name,
            info.defined_names.join(", "),
            aliases,
            fw = file_width,
            nw = names_width
        );
    }
    println!("\n{} templates", infos.len());
}
