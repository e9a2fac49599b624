use std::path::PathBuf;

use girgen_compiler::{Config, dump};

use crate::util::{fail, load_namespace, write_output};

pub struct DumpArgs {
    pub namespace_path: PathBuf,
    pub package: Option<String>,
    pub import_prefix: Option<String>,
    pub color: bool,
    pub output: Option<PathBuf>,
}

pub fn run(args: DumpArgs) {
    let ns = load_namespace(&args.namespace_path).unwrap_or_else(|err| fail(err));

    let mut config = Config::new().colored(args.color);
    if let Some(package) = &args.package {
        config = config.package(package);
    }
    if let Some(prefix) = &args.import_prefix {
        config = config.import_prefix(prefix);
    }

    if let Err(err) = write_output(args.output.as_deref(), &dump(&ns, &config)) {
        fail(err);
    }
}
