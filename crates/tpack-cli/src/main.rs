//! # tpack CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Test package toolkit.
///
/// Builds test packages from assembly paths or manifests, lists the
/// assemblies a runner would load, and queries typed run settings.
#[derive(Parser, Debug)]
#[command(name = "tpack", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the assembly paths to load.
    Assemblies(tpack_cli::assemblies::AssembliesArgs),
    /// Emit the package as a manifest.
    Show(tpack_cli::show::ShowArgs),
    /// Read a typed setting from the root package.
    Get(tpack_cli::get::GetArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs on stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Assemblies(args) => tpack_cli::assemblies::run(&args, &mut stdout),
        Commands::Show(args) => tpack_cli::show::run(&args, &mut stdout),
        Commands::Get(args) => {
            tracing::debug!(key = %args.key, ty = ?args.ty, "reading setting");
            tpack_cli::get::run(&args, &mut stdout)
        }
    }
}
