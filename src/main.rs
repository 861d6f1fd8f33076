use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use overlay_input::cli::{CliArgs, CliCommand};
use overlay_input::host::EchoBackend;
use overlay_input::replay::{load_script, replay};

fn main() -> Result<()> {
    overlay_input::tracing::init();

    let args = CliArgs::parse();
    let config = args.resolve_config()?;
    tracing::debug!(?config, "resolved config");

    match args.command {
        CliCommand::Replay {
            script,
            print_states,
        } => {
            let events = load_script(&script)?;
            tracing::info!("Replaying {} events from {}", events.len(), script.display());

            let backend = Arc::new(EchoBackend::new(config.model_name.clone()));
            let report = replay(config.session(), events, backend);

            if print_states {
                for (i, state) in report.states.iter().enumerate() {
                    println!("{:>4}  {}", i + 1, state);
                }
            }
            for exchange in &report.exchanges {
                println!("> {}", exchange.submitted);
                println!("< {}", exchange.reply);
            }
            println!("final: {}", report.final_state);
        }
    }

    Ok(())
}
