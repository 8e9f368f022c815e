mod cli;
mod fixtures;
mod modules;

use std::sync::Arc;

use clap::Parser;
use trellis_api::http::{HttpExecutor, ReqwestExecutor};
use trellis_api::{ActionTypes, ApiCall, Schema};
use trellis_shell::{Environment, Preload, Shell, ShellConfig};

use crate::cli::Commands;
use crate::fixtures::load_fixtures;
use crate::modules::default_modules;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = ShellConfig::load(cli.config.as_deref())?;
    if let Some(app) = cli.app {
        config.app = app;
    }
    if cli.preload.is_some() {
        config.preload = cli.preload;
    }

    let preload = match &config.preload {
        Some(path) => Preload::load(path).await?,
        None => Preload::default(),
    };

    let executor: Arc<dyn HttpExecutor> = match &cli.fixtures {
        Some(path) => Arc::new(load_fixtures(path).await?),
        None => Arc::new(ReqwestExecutor::new()),
    };

    let env = Environment {
        debug: config.debug,
        framed: cli.framed,
    };
    let modules = default_modules(&config)?;
    let mut shell = Shell::boot(config, &env, &modules, executor, preload)?;

    match cli.command {
        Commands::Routes => {
            for line in shell.routes().describe() {
                println!("{line}");
            }
        }
        Commands::Slots => {
            let registry = shell.registry();
            for slot in registry.slots() {
                let names: Vec<String> = registry
                    .get_named_extensions(slot.as_str())
                    .into_iter()
                    .filter_map(|named| named.name)
                    .collect();
                if names.is_empty() {
                    println!("{slot} ({})", registry.len(slot.as_str()));
                } else {
                    println!("{slot} ({}): {}", registry.len(slot.as_str()), names.join(", "));
                }
            }
        }
        Commands::Render { path } => {
            let html = shell.render(&path).await?;
            println!("{html}");
        }
        Commands::Fetch {
            endpoint,
            key,
            many,
            method,
        } => {
            let mut call =
                ApiCall::new(ActionTypes::prefixed("FETCH"), endpoint).with_method(method);
            if let Some(key) = key {
                call = call.with_schema(if many {
                    Schema::array(key)
                } else {
                    Schema::entity(key)
                });
            }

            let mut actions = Vec::new();
            shell.api().call(&call, &mut actions).await;

            for action in &actions {
                println!("{} ({})", action.kind, action.phase);
                if let Some(normalized) = action.normalized() {
                    let patch = normalized.clone().into_state_patch();
                    println!("{}", serde_json::to_string_pretty(&patch)?);
                }
                if let Some(error) = action.error() {
                    eprintln!("error: {error}");
                }
            }
        }
    }

    Ok(())
}
