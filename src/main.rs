//! `layer-alias` — inspect how import aliases resolve across project layers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use layer_alias::config::{self, ProjectConfig};
use layer_alias::output::{AliasTable, Resolution};
use layer_alias::{apply_aliases, BuildConfig, LayerAliasError, LayerAliasModule};

#[derive(Parser)]
#[command(name = "layer-alias")]
#[command(version)]
#[command(about = "Resolve import aliases across layered project roots", long_about = None)]
struct Cli {
    /// Config file (default: nearest layer-alias.json)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the layer stack and the expanded alias list
    Aliases,

    /// Resolve import requests through the alias list
    Resolve {
        /// Requests such as `@/components/Nav.vue?macro=true`
        #[arg(value_name = "REQUEST", required = true)]
        requests: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("layer-alias: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), LayerAliasError> {
    let project = load_config(cli.config.as_deref())?;
    log::info!("using {}", project.path.display());

    let module = LayerAliasModule::setup(&project.options);
    let mut build = BuildConfig::with_aliases(project.aliases);
    module.extend_config(&mut build);
    let rules = build.rules().unwrap_or(&[]);
    let resolver = module.resolver();

    let written = match &cli.command {
        Commands::Aliases => {
            let table = AliasTable {
                root_dir: resolver.root_dir(),
                snapshot: resolver.snapshot(),
                rules,
            };
            write!(out, "{table}")
        }
        Commands::Resolve { requests } => requests.iter().try_for_each(|request| {
            let resolved = apply_aliases(rules, request);
            writeln!(
                out,
                "{}",
                Resolution {
                    request,
                    resolved: &resolved,
                }
            )
        }),
    };

    written.map_err(|e| LayerAliasError::Io {
        path: "<stdout>".to_string(),
        source: e,
    })
}

fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig, LayerAliasError> {
    if let Some(path) = explicit {
        return config::load(path);
    }
    let cwd = std::env::current_dir().map_err(|e| LayerAliasError::Io {
        path: ".".to_string(),
        source: e,
    })?;
    config::discover(&cwd)
}
