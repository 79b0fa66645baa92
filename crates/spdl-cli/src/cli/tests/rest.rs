//! Tests for normalize, import-har, interactive, completions and man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_normalize() {
    match parse(&["spdl", "normalize", "https://x.svc.ms/transform/mediasegment?provider=spo"]) {
        CliCommand::Normalize { url, json } => {
            assert_eq!(url, "https://x.svc.ms/transform/mediasegment?provider=spo");
            assert!(!json);
        }
        _ => panic!("expected Normalize"),
    }
}

#[test]
fn cli_parse_normalize_json() {
    match parse(&["spdl", "normalize", "--json", "https://example.com"]) {
        CliCommand::Normalize { json, .. } => assert!(json),
        _ => panic!("expected Normalize with --json"),
    }
}

#[test]
fn cli_parse_import_har() {
    match parse(&["spdl", "import-har", "capture.har", "--cookies", "c.txt"]) {
        CliCommand::ImportHar {
            path,
            cookies,
            name,
            output_dir,
        } => {
            assert_eq!(path, std::path::PathBuf::from("capture.har"));
            assert_eq!(cookies.as_deref(), Some(std::path::Path::new("c.txt")));
            assert!(name.is_none());
            assert!(output_dir.is_none());
        }
        _ => panic!("expected ImportHar"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["spdl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["spdl", "completions", "cmd.exe"]).is_err());
}

#[test]
fn cli_parse_man() {
    match parse(&["spdl", "man"]) {
        CliCommand::Man => {}
        _ => panic!("expected Man"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn cli_parse_interactive() {
    match parse(&["spdl", "interactive"]) {
        CliCommand::Interactive => {}
        _ => panic!("expected Interactive"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["spdl"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["spdl", "add", "https://example.com"]).is_err());
}
