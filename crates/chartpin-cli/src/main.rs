//! chartpin CLI - pin chart dependency versions and apply provider overrides

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod error;
mod exit_codes;
mod logging;

use commands::overrides::OverridesPaths;
use context::{ConfigArgs, RunContext};
use error::Result;

#[derive(Parser)]
#[command(name = "chartpin")]
#[command(version)]
#[command(
    about = "Pin chart dependency versions from a version stream and apply provider value overrides",
    long_about = None
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short = 'v', long, global = true)]
    debug: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in missing dependency versions in requirements.yaml
    Versions {
        /// Chart directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Merge the provider's value overrides over the chart values
    Overrides {
        #[command(flatten)]
        args: OverridesArgs,
    },

    /// Run `versions` then `overrides`
    Prepare {
        #[command(flatten)]
        args: OverridesArgs,
    },

    /// List the values files present in a chart
    ValuesFiles {
        /// Chart directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Print the namespace override pairs
    NamespaceValues {
        /// Namespace (defaults to cluster.namespace from chartpin.yml)
        namespace: Option<String>,

        /// Directory to look up chartpin.yml from
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Print the pairs as a YAML values tree
        #[arg(long)]
        yaml: bool,
    },
}

#[derive(clap::Args)]
struct OverridesArgs {
    /// Chart directory
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Base values file (default: <dir>/values.yaml)
    #[arg(short = 'f', long)]
    values: Option<PathBuf>,

    /// Directory of provider override templates (default: <dir>/providers)
    #[arg(long)]
    providers_dir: Option<PathBuf>,

    /// Write the merged values to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl OverridesArgs {
    fn paths(&self) -> OverridesPaths {
        OverridesPaths {
            values: self.values.clone(),
            providers_dir: self.providers_dir.clone(),
            output: self.output.clone(),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Versions { dir } => {
            let ctx = RunContext::load(&dir, &cli.config)?;
            commands::versions::run(&ctx)
        }
        Commands::Overrides { args } => {
            let ctx = RunContext::load(&args.dir, &cli.config)?;
            commands::overrides::run(&ctx, &args.paths())
        }
        Commands::Prepare { args } => {
            let ctx = RunContext::load(&args.dir, &cli.config)?;
            commands::prepare::run(&ctx, &args.paths())
        }
        Commands::ValuesFiles { dir } => commands::values_files::run(&dir),
        Commands::NamespaceValues {
            namespace,
            dir,
            yaml,
        } => {
            let ctx = RunContext::load(&dir, &cli.config)?;
            commands::namespace::run(namespace.as_deref(), yaml, &ctx)
        }
    }
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
