use std::ffi::OsString;

use clap::{error::ErrorKind, Parser};
use tracing::debug;
use vulkan_samples::prelude::DEFAULT_VALIDATION_LAYER;

/// Registers a debug report callback, then provokes a validation error to
/// check the callback fires.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "dbgcreatemsgcallback", version)]
pub struct Args {
    /// Print the messages received by the callback
    #[arg(long)]
    pub noisy: bool,

    /// Validation layer expected to report the error
    #[arg(long, default_value = DEFAULT_VALIDATION_LAYER)]
    pub layer: String,

    /// Anything else on the command line is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<OsString>,
}

/// Rewrites the single-dash `-noisy` spelling into `--noisy`.
fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg == "-noisy" {
                OsString::from("--noisy")
            } else {
                arg
            }
        })
        .collect()
}

impl Args {
    pub fn parse_from_env() -> Self {
        Self::parse_lenient(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parses the command line without ever rejecting it: arguments that do
    /// not parse are dropped and the sample runs with its defaults, noisy
    /// only when `-noisy` is the sole argument. Only `--help` and `--version`
    /// come back as `Err`.
    pub fn parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = normalize_legacy_flags(args);

        match Self::try_parse_from(args.clone()) {
            Ok(parsed) => Ok(parsed),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(e)
            }
            Err(e) => {
                debug!("ignoring command line: {e}");
                Ok(Self {
                    noisy: args.len() == 2 && args[1] == "--noisy",
                    layer: DEFAULT_VALIDATION_LAYER.to_owned(),
                    ignored: args.into_iter().skip(1).collect(),
                })
            }
        }
    }

    pub fn ignored(&self) -> &[OsString] {
        &self.ignored
    }
}
