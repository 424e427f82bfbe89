//! HTTP server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use hot_coffee::settings::HotCoffeeSettings;

/// Resolved inputs for [`super::create_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    data_dir: PathBuf,
}

impl ServerConfig {
    /// Build a configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            data_dir: data_dir.into(),
        }
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Directory holding the order store.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl From<&HotCoffeeSettings> for ServerConfig {
    fn from(settings: &HotCoffeeSettings) -> Self {
        Self::new(settings.bind_addr(), settings.data_dir())
    }
}
