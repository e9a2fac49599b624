use std::path::PathBuf;

use girgen_compiler::Config;
use girgen_core::Namespace;

use crate::util::{CliError, fail, load_namespace, write_output};

pub struct GenerateArgs {
    pub namespace_path: PathBuf,
    pub package: Option<String>,
    pub includes: Vec<String>,
    pub pkg_config: Vec<String>,
    pub import_prefix: Option<String>,
    pub field_getters: bool,
    pub skip_deprecated: bool,
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn config(&self) -> Config {
        let mut config = Config::new()
            .field_getters(self.field_getters)
            .skip_deprecated(self.skip_deprecated);
        if let Some(package) = &self.package {
            config = config.package(package);
        }
        if let Some(prefix) = &self.import_prefix {
            config = config.import_prefix(prefix);
        }
        for header in &self.includes {
            config = config.include(header);
        }
        for package in &self.pkg_config {
            config = config.pkg_config(package);
        }
        config
    }
}

/// Generate the Go source for a loaded namespace.
pub fn render(ns: &Namespace, args: &GenerateArgs) -> Result<String, CliError> {
    Ok(girgen_compiler::generate(ns, &args.config())?)
}

pub fn run(args: GenerateArgs) {
    let result = load_namespace(&args.namespace_path)
        .and_then(|ns| render(&ns, &args))
        .and_then(|source| write_output(args.output.as_deref(), &source));
    if let Err(err) = result {
        fail(err);
    }
}
