//! tapflowd - serve the script interpreter over HTTP, or run a script file
//! straight from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tapflow::config::Config;
use tapflow::driver::mock::MockDriver;
use tapflow::engine::Interpreter;
use tapflow::event::NullSink;
use tapflow::model::ScriptRequest;
use tapflow::vision::mock::MockVision;

#[derive(Parser)]
#[command(name = "tapflowd", about = "UI-automation script interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run a script file and print the Terminal Result as JSON.
    Run {
        script: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tapflow::init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve { host, port, config } => serve(host, port, config).await,
        Command::Run { script, config } => run(script, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn serve(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> tapflow::Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }
    tapflow::http::serve(config).await
}

async fn run(script_path: PathBuf, config_path: Option<PathBuf>) -> tapflow::Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let raw = std::fs::read_to_string(&script_path)?;
    let request: ScriptRequest = serde_json::from_str(&raw)?;

    let interpreter = Interpreter::new(
        Arc::new(MockDriver::new()),
        Arc::new(MockVision::new()),
        config.limits,
    );
    let result = interpreter
        .run_script(&request.steps, request.variables.as_ref(), Arc::new(NullSink))
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
