//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::json::JsonArgs;

pub struct GenerateParams {
    pub namespace_path: PathBuf,
    pub package: Option<String>,
    pub includes: Vec<String>,
    pub pkg_config: Vec<String>,
    pub import_prefix: Option<String>,
    pub no_field_getters: bool,
    pub skip_deprecated: bool,
    pub output: Option<PathBuf>,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            namespace_path: namespace_path(m),
            package: m.get_one::<String>("package").cloned(),
            includes: strings(m, "include"),
            pkg_config: strings(m, "pkg_config"),
            import_prefix: m.get_one::<String>("import_prefix").cloned(),
            no_field_getters: m.get_flag("no_field_getters"),
            skip_deprecated: m.get_flag("skip_deprecated"),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            namespace_path: p.namespace_path,
            package: p.package,
            includes: p.includes,
            pkg_config: p.pkg_config,
            import_prefix: p.import_prefix,
            field_getters: !p.no_field_getters,
            skip_deprecated: p.skip_deprecated,
            output: p.output,
        }
    }
}

pub struct JsonParams {
    pub namespace_path: PathBuf,
    pub compact: bool,
    pub output: Option<PathBuf>,
    // Note: generation flags are parsed but not extracted (unified flags)
}

impl JsonParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            namespace_path: namespace_path(m),
            compact: m.get_flag("compact"),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<JsonParams> for JsonArgs {
    fn from(p: JsonParams) -> Self {
        Self {
            namespace_path: p.namespace_path,
            compact: p.compact,
            output: p.output,
        }
    }
}

pub struct DumpParams {
    pub namespace_path: PathBuf,
    pub package: Option<String>,
    pub import_prefix: Option<String>,
    pub color: ColorChoice,
    pub output: Option<PathBuf>,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let output = m.get_one::<PathBuf>("output").cloned();
        // Files never get escape codes unless asked for.
        let color = match (parse_color(m), &output) {
            (ColorChoice::Auto, Some(_)) => ColorChoice::Never,
            (choice, _) => choice,
        };
        Self {
            namespace_path: namespace_path(m),
            package: m.get_one::<String>("package").cloned(),
            import_prefix: m.get_one::<String>("import_prefix").cloned(),
            color,
            output,
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            namespace_path: p.namespace_path,
            package: p.package,
            import_prefix: p.import_prefix,
            color: p.color.should_colorize(),
            output: p.output,
        }
    }
}

/// The positional is required, so clap guarantees it is present.
fn namespace_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("namespace_path")
        .cloned()
        .unwrap_or_default()
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
