//! Chat relay server binary.

use chat_relay::common::logger::setup_logger;
use chat_relay::ui::run_server;
use clap::Parser;

/// Real-time chat relay server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind to
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_logger("server", &args.log_level);

    run_server(args.host, args.port).await
}
