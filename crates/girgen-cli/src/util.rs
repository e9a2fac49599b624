use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use girgen_core::{ModelError, Namespace};
use tracing_subscriber::EnvFilter;

/// Failures of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{path}`: {source}")]
    Read { path: String, source: io::Error },

    #[error("cannot write `{path}`: {source}")]
    Write { path: String, source: io::Error },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Generate(#[from] girgen_compiler::Error),

    #[error("cannot encode namespace: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read and validate a namespace file; `-` reads stdin.
pub fn load_namespace(path: &Path) -> Result<Namespace, CliError> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?
    };
    let ns = Namespace::from_json(&json)?;
    tracing::debug!(namespace = %ns.name, "loaded namespace");
    Ok(ns)
}

/// Write to the output file, or stdout when none is given.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, text).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|source| CliError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    }
}

/// Print the error and exit with status 1.
pub fn fail(err: CliError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
