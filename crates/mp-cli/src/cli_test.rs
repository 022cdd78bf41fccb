use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_render() {
    let cli = Cli::try_parse_from(["mailpeek", "-p", "site", "render", "welcome", "-o", "out.html"])
        .unwrap();
    assert_eq!(cli.global.project_dir, "site");
    match cli.command {
        Commands::Render(args) => {
            assert_eq!(args.identifier, "welcome");
            assert_eq!(args.output.as_deref(), Some("out.html"));
            assert!(!args.show_context);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_serve_cache_flags_conflict() {
    let result = Cli::try_parse_from(["mailpeek", "serve", "--cache", "--no-cache"]);
    assert!(result.is_err());
}

#[test]
fn test_ls_defaults_to_table() {
    let cli = Cli::try_parse_from(["mailpeek", "ls"]).unwrap();
    match cli.command {
        Commands::Ls(args) => {
            assert_eq!(args.output, LsOutput::Table);
            assert!(!args.all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
