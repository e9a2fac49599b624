//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: every command accepts the generation flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{dump_command, generate_command, json_command};
use crate::commands::generate::GenerateArgs;

#[test]
fn generate_extracts_all_flags() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "Gtk.json",
            "--package",
            "gtk4",
            "--include",
            "gtk/gtk.h",
            "--include",
            "gtk/gtkx.h",
            "--pkg-config",
            "gtk4",
            "--import-prefix",
            "example.com/gir",
            "--no-field-getters",
            "--skip-deprecated",
            "-o",
            "gtk.go",
        ])
        .unwrap();
    let params = GenerateParams::from_matches(&m);

    assert_eq!(params.namespace_path, PathBuf::from("Gtk.json"));
    assert_eq!(params.package.as_deref(), Some("gtk4"));
    assert_eq!(params.includes, vec!["gtk/gtk.h", "gtk/gtkx.h"]);
    assert_eq!(params.pkg_config, vec!["gtk4"]);
    assert_eq!(params.import_prefix.as_deref(), Some("example.com/gir"));
    assert_eq!(params.output, Some(PathBuf::from("gtk.go")));

    let args: GenerateArgs = params.into();
    assert!(!args.field_getters);
    assert!(args.skip_deprecated);
}

#[test]
fn generate_defaults() {
    let m = generate_command()
        .try_get_matches_from(["generate", "-"])
        .unwrap();
    let args: GenerateArgs = GenerateParams::from_matches(&m).into();

    assert_eq!(args.namespace_path, PathBuf::from("-"));
    assert!(args.package.is_none());
    assert!(args.includes.is_empty());
    assert!(args.field_getters);
    assert!(!args.skip_deprecated);
    assert!(args.output.is_none());
}

#[test]
fn generate_requires_namespace() {
    let result = generate_command().try_get_matches_from(["generate"]);
    assert!(result.is_err());
}

#[test]
fn json_accepts_generate_flags() {
    let result = json_command().try_get_matches_from([
        "json",
        "Gtk.json",
        "--include",
        "gtk/gtk.h",
        "--skip-deprecated",
        "--package",
        "gtk",
        "--color",
        "never",
    ]);
    assert!(
        result.is_ok(),
        "json should accept generate flags: {:?}",
        result.err()
    );

    let params = JsonParams::from_matches(&result.unwrap());
    assert_eq!(params.namespace_path, PathBuf::from("Gtk.json"));
    assert!(!params.compact);
}

#[test]
fn json_compact() {
    let m = json_command()
        .try_get_matches_from(["json", "Gtk.json", "--compact"])
        .unwrap();
    assert!(JsonParams::from_matches(&m).compact);
}

#[test]
fn dump_accepts_generate_flags() {
    let result = dump_command().try_get_matches_from([
        "dump",
        "Gtk.json",
        "--pkg-config",
        "gtk4",
        "--no-field-getters",
        "--compact",
    ]);
    assert!(
        result.is_ok(),
        "dump should accept generate flags: {:?}",
        result.err()
    );
}

#[test]
fn dump_color_choice() {
    let m = dump_command()
        .try_get_matches_from(["dump", "Gtk.json", "--color", "always"])
        .unwrap();
    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Always);

    let m = dump_command()
        .try_get_matches_from(["dump", "Gtk.json", "--color", "never"])
        .unwrap();
    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Never);
}

#[test]
fn dump_to_file_is_plain_by_default() {
    let m = dump_command()
        .try_get_matches_from(["dump", "Gtk.json", "-o", "gtk.txt"])
        .unwrap();
    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Never);

    let m = dump_command()
        .try_get_matches_from(["dump", "Gtk.json", "-o", "gtk.txt", "--color", "always"])
        .unwrap();
    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Always);
}

#[test]
fn invalid_color_is_rejected() {
    let result = dump_command().try_get_matches_from(["dump", "Gtk.json", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn json_help_hides_generate_flags() {
    let help = json_command().render_help().to_string();
    assert!(help.contains("--compact"));
    assert!(!help.contains("--include"));
    assert!(!help.contains("--pkg-config"));
    assert!(!help.contains("--skip-deprecated"));
    assert!(!help.contains("--color"));
}

#[test]
fn generate_help_hides_output_format_flags() {
    let help = generate_command().render_help().to_string();
    assert!(help.contains("--include"));
    assert!(help.contains("--import-prefix"));
    assert!(!help.contains("--compact"));
    assert!(!help.contains("--color"));
}

#[test]
fn dump_help_hides_generate_flags() {
    let help = dump_command().render_help().to_string();
    assert!(help.contains("--color"));
    assert!(help.contains("--package"));
    assert!(!help.contains("--include"));
    assert!(!help.contains("--no-field-getters"));
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["girgen", "generate", "Gtk.json", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);

    let m = build_cli()
        .try_get_matches_from(["girgen", "-v", "dump", "Gtk.json"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 1);
}

#[test]
fn subcommand_is_required() {
    let result = build_cli().try_get_matches_from(["girgen"]);
    assert!(result.is_err());
}
