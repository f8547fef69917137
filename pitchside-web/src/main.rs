//! Pitchside Web Server
//!
//! A small community site: registration, login, contact form, cached news
//! and live scores.

use clap::Parser;
use pitchside_web::server::PitchsideServerBuilder;
use pitchside_web::{init_logging, WebConfig};

/// Pitchside web server
#[derive(Parser)]
#[command(name = "pitchside-web")]
#[command(about = "Community site with news and live scores")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL for user and contact storage
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    init_logging();

    let args = Args::parse();

    let mut config = WebConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = Some(database_url);
    }

    println!("🚀 Starting Pitchside");
    println!("📍 Server: http://{}", config.address());
    if config.database_url.is_none() {
        println!("⚠️  No DATABASE_URL set; using in-memory stores");
    }
    if !config.mail_configured() {
        println!("⚠️  SMTP not configured; notification mail disabled");
    }

    let mut builder = PitchsideServerBuilder::new()
        .host(config.host.clone())
        .port(config.port);
    if let Some(database_url) = config.database_url.clone() {
        builder = builder.database_url(database_url);
    }

    let server = match builder.build().await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("❌ Failed to build server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("❌ Server failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parsing_defaults_and_overrides() {
        let args = Args::parse_from(["pitchside-web"]);
        assert!(args.host.is_none());
        assert!(args.port.is_none());

        let args = Args::parse_from(["pitchside-web", "--host", "0.0.0.0", "--port", "3000"]);
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(3000));
    }
}
