use std::path::PathBuf;

use crate::util::{CliError, fail, load_namespace, write_output};

pub struct JsonArgs {
    pub namespace_path: PathBuf,
    pub compact: bool,
    pub output: Option<PathBuf>,
}

pub fn run(args: JsonArgs) {
    let result = load_namespace(&args.namespace_path)
        .and_then(|ns| {
            let mut json = if args.compact {
                serde_json::to_string(&ns)?
            } else {
                ns.to_json()?
            };
            json.push('\n');
            Ok::<_, CliError>(json)
        })
        .and_then(|json| write_output(args.output.as_deref(), &json));
    if let Err(err) = result {
        fail(err);
    }
}
