use std::net::{Ipv4Addr, SocketAddr};
use std::process::ExitCode;

use clap::Parser;
use httpfromtcp::protocol::Request;
use httpfromtcp_cli::{DEFAULT_PORT, init_tracing};
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};

#[derive(Parser)]
#[command(name = "tcplistener")]
#[command(about = "Print every request received over TCP", long_about = None)]
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

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cli.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(cause = %e, %addr, "error listening");
            return ExitCode::FAILURE;
        }
    };
    info!(%addr, "listening for TCP traffic");

    loop {
        let (tcp_stream, remote_addr) = match listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                error!(cause = %e, "error accepting connection");
                return ExitCode::FAILURE;
            }
        };
        info!(%remote_addr, "new connection");

        match Request::from_reader(tcp_stream).await {
            Ok(request) => print_request(&request),
            Err(e) => warn!(%remote_addr, cause = %e, "error parsing request"),
        }
        info!(%remote_addr, "connection closed");
    }
}

fn print_request(request: &Request) {
    println!("Request line:");
    println!("- Method: {}", request.method());
    println!("- Target: {}", request.target());
    println!("- Version: {}", request.version());

    println!("Headers:");
    for (name, value) in request.headers() {
        println!("- {name}: {value}");
    }

    println!("Body:");
    println!("{}", String::from_utf8_lossy(request.body()));
}
