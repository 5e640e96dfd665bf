//! # Show Subcommand
//!
//! Emits the package as a JSON or YAML manifest, suitable for handing to a
//! runner in another process or saving for `--manifest`.

use std::io::Write;

use clap::{Args, ValueEnum};
use tpack_core::ManifestFormat;

use crate::source::PackageSource;

/// Output format for the show subcommand.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl From<OutputFormat> for ManifestFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => ManifestFormat::Json,
            OutputFormat::Yaml => ManifestFormat::Yaml,
        }
    }
}

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: PackageSource,

    /// Manifest format to emit.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn run(args: &ShowArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let package = args.source.build()?;
    let text = package.to_manifest(args.format.into())?;
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
