//! Pitchside Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Pitchside web server
pub struct PitchsideServer {
    config: WebConfig,
    state: AppState,
}

impl PitchsideServer {
    /// Create a new server
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;
        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Pitchside web server");
        info!(address = %address, "Binding");

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!(error = %e, "Server error");
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for PitchsideServer
pub struct PitchsideServerBuilder {
    config: WebConfig,
}

impl PitchsideServerBuilder {
    /// Create a builder seeded from the environment
    pub fn new() -> Self {
        Self {
            config: WebConfig::from_env(),
        }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the database URL
    pub fn database_url<S: Into<String>>(mut self, database_url: S) -> Self {
        self.config.database_url = Some(database_url.into());
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<PitchsideServer> {
        PitchsideServer::new(self.config).await
    }
}

impl Default for PitchsideServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn server_creation_with_defaults() {
        let config = WebConfig::default();
        let server = PitchsideServer::new(config).await;
        assert!(server.is_ok());
    }

    #[tokio::test]
    async fn builder_overrides_host_and_port() {
        let builder = PitchsideServerBuilder::new().host("localhost").port(3000);

        assert_eq!(builder.config.host, "localhost");
        assert_eq!(builder.config.port, 3000);
    }
}
