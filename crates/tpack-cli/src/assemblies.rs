//! # Assemblies Subcommand
//!
//! Prints the flattened list of assembly paths a runner would load, one
//! per line, in depth-first sub-package order.

use std::io::Write;

use clap::Args;

use crate::source::PackageSource;

/// Arguments for the assemblies subcommand.
#[derive(Args, Debug)]
pub struct AssembliesArgs {
    #[command(flatten)]
    pub source: PackageSource,
}

pub fn run(args: &AssembliesArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let package = args.source.build()?;
    let paths = package.assembly_paths();
    tracing::debug!(package = %package, assemblies = paths.len(), "flattened package");
    for path in paths {
        writeln!(out, "{path}")?;
    }
    Ok(())
}
