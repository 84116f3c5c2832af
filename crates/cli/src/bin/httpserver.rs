use std::process::ExitCode;

use clap::Parser;
use httpfromtcp::handler::make_handler;
use httpfromtcp::server::Server;
use httpfromtcp_cli::{DEFAULT_PORT, demo_handler, init_tracing};
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "httpserver")]
#[command(about = "Serve the demo routes, one request per connection", long_about = None)]
struct Cli {
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let mut server = match Server::serve(cli.port, make_handler(demo_handler)).await {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "error starting server");
            return ExitCode::FAILURE;
        }
    };
    info!(port = server.local_addr().port(), "server started");

    shutdown_signal().await;

    if let Err(e) = server.close().await {
        error!(cause = %e, "error closing server");
        return ExitCode::FAILURE;
    }
    info!("server gracefully stopped");
    ExitCode::SUCCESS
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(e) => {
            error!(cause = %e, "can't install SIGTERM handler, waiting for ctrl-c only");
            wait_ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = wait_ctrl_c() => {}
        _ = terminate.recv() => info!("received SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    wait_ctrl_c().await;
}

async fn wait_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl-c"),
        Err(e) => error!(cause = %e, "can't listen for ctrl-c"),
    }
}
