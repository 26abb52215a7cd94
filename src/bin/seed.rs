//! Graph Seeder CLI
//!
//! Generates a benchmark dataset in a Postgres-backed concept-graph store
//! from a YAML spec, or validates the spec without writing anything.

use clap::{Parser, Subcommand};
use graph_seeder::{BenchSpec, GraphAssembler, PsqlClient};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graph-seeder")]
#[command(about = "Generate graph-shaped benchmark data in a concept store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset described by a spec file
    Run {
        /// Path to the YAML benchmark spec
        spec: PathBuf,

        /// RNG seed (overrides the spec's `seed`)
        #[arg(long)]
        seed: Option<u64>,

        /// Database URL (overrides the spec's `database_url`)
        #[arg(long)]
        database_url: Option<String>,

        /// Skip the database reset step
        #[arg(long)]
        no_init: bool,
    },

    /// Validate a spec file without touching the store
    Check {
        /// Path to the YAML benchmark spec
        spec: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run {
            spec,
            seed,
            database_url,
            no_init,
        } => {
            let mut spec = BenchSpec::load(&spec)?;
            if let Some(seed) = seed {
                spec.seed = Some(seed);
            }
            if let Some(url) = database_url {
                spec.database_url = Some(url);
            }
            spec.validate()?;

            let url = spec
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("no database_url in spec or --database-url flag"))?;
            let mut client = PsqlClient::connect(url)?;

            if !no_init {
                client.init_database(&spec.schemas)?;
            }

            let mut rng = match spec.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let report = GraphAssembler::new(&mut client, &mut rng).run(&spec)?;
            print!("{report}");
            Ok(())
        }

        Commands::Check { spec } => {
            let spec = BenchSpec::load(&spec)?;
            spec.validate()?;

            println!("Spec OK. Planned entities:");
            for (kind, count) in spec.planned_entities() {
                println!("  {kind}: {count}");
            }
            Ok(())
        }
    }
}
