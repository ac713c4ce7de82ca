use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use chat_gateway::config::{self, GatewayConfig};
use chat_gateway::http::HttpServer;
use chat_gateway::lifecycle::{signals, Shutdown};
use chat_gateway::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "chat-gateway", version)]
#[command(about = "Single-route gateway forwarding chat requests to a webhook", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port (overrides the file and PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Webhook URL (overrides the file and N8N_WEBHOOK_URL).
    #[arg(long)]
    webhook_url: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut GatewayConfig) {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(url) = &self.webhook_url {
            config.webhook.url = Some(url.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before clap so GATEWAY_CONFIG can come from .env too.
    let dotenv = config::load_dotenv(None)?;
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    logging::init_logging(&config.observability.log_level);
    tracing::info!("chat-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = match config::validated(config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start with invalid configuration");
            return Err(e.into());
        }
    };

    let webhook_host = config
        .webhook
        .url
        .as_deref()
        .and_then(|u| url::Url::parse(u).ok())
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        webhook_host = %webhook_host,
        webhook_timeout_secs = config.webhook.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
