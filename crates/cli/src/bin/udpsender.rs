use std::process::ExitCode;

use clap::Parser;
use httpfromtcp_cli::{DEFAULT_PORT, init_tracing};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UdpSocket;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "udpsender")]
#[command(about = "Send each line typed on stdin as a UDP datagram", long_about = None)]
struct Cli {
    #[arg(long, default_value = "localhost")]
    host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let socket = match UdpSocket::bind("0.0.0.0:0").await {
        Ok(socket) => socket,
        Err(e) => {
            error!(cause = %e, "error binding UDP socket");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = socket.connect((cli.host.as_str(), cli.port)).await {
        error!(cause = %e, host = %cli.host, port = cli.port, "error connecting to UDP");
        return ExitCode::FAILURE;
    }
    info!(host = %cli.host, port = cli.port, "sending lines over UDP");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if let Err(e) = prompt(&mut stdout).await {
            error!(cause = %e, "error writing prompt");
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return ExitCode::SUCCESS,
            Err(e) => {
                error!(cause = %e, "error reading input");
                return ExitCode::FAILURE;
            }
        };

        if let Err(e) = socket.send(format!("{line}\n").as_bytes()).await {
            error!(cause = %e, "error writing to UDP");
        }
    }
}

async fn prompt(stdout: &mut tokio::io::Stdout) -> std::io::Result<()> {
    stdout.write_all(b"> ").await?;
    stdout.flush().await
}
