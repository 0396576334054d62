//! trellis-routes CLI
//!
//! Command-line tool for checking route tables and generating URLs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use trellis_router::{PatternCompiler, RouteConfig, UrlValues};

/// Route pattern compiler and URL generator.
#[derive(Parser)]
#[command(name = "trellis-routes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a single pattern and print its regex and defaults.
    Compile {
        /// Raw path or host pattern.
        pattern: String,

        /// Variable constraint as `name=regex` (repeatable).
        #[arg(short, long = "constraint", value_parser = parse_key_value)]
        constraints: Vec<(String, String)>,
    },

    /// Compile every route of a route table.
    Check {
        /// Route table (JSON).
        #[arg(short, long, env = "TRELLIS_ROUTES", default_value = "routes.json")]
        routes: PathBuf,
    },

    /// Generate the URL of a named route.
    Generate {
        /// Route table (JSON).
        #[arg(short, long, env = "TRELLIS_ROUTES", default_value = "routes.json")]
        routes: PathBuf,

        /// Route name.
        name: String,

        /// Values, host variables first.
        values: Vec<String>,

        /// Treat values as `name=value` pairs.
        #[arg(long)]
        named: bool,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected `name=value`, got `{s}`"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Compile {
            pattern,
            constraints,
        } => {
            let constraints: BTreeMap<String, String> = constraints.into_iter().collect();
            let compiled = PatternCompiler::new().compile(&pattern, &constraints)?;

            println!("{}", compiled.as_str());
            for name in compiled.variables() {
                let default = compiled.default_value(name).unwrap_or_default();
                println!("  {name} = {default:?}");
            }
        }

        Commands::Check { routes } => {
            let config = RouteConfig::from_path(&routes)
                .with_context(|| format!("failed to load {}", routes.display()))?;

            let total = config.routes.len();
            let mut failed = 0;
            for definition in config.routes {
                let label = definition
                    .name
                    .clone()
                    .unwrap_or_else(|| definition.path.clone());
                match definition.into_route().compile() {
                    Ok(compiled) => {
                        println!(" [OK] {label}");
                        println!("      path {}", compiled.path().as_str());
                        println!("      host {}", compiled.host().as_str());
                    }
                    Err(e) => {
                        failed += 1;
                        error!("{label}: {e}");
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{failed} of {total} routes are malformed");
            }
            info!("All {total} routes compiled.");
        }

        Commands::Generate {
            routes,
            name,
            values,
            named,
        } => {
            let collection = RouteConfig::from_path(&routes)
                .with_context(|| format!("failed to load {}", routes.display()))?
                .into_collection()?;

            let values = if named {
                let pairs = values
                    .iter()
                    .map(|v| parse_key_value(v).map_err(anyhow::Error::msg))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                UrlValues::named(pairs)
            } else {
                UrlValues::positional(values)
            };

            println!("{}", collection.url_for(&name, values)?);
        }
    }

    Ok(())
}
