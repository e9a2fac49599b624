mod cli;
mod commands;
mod util;

use cli::{DumpParams, GenerateParams, JsonParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    util::init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("json", m)) => {
            let params = JsonParams::from_matches(m);
            commands::json::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
