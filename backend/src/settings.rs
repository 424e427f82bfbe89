//! Runtime settings loaded via OrthoConfig.
//!
//! Values are layered defaults < configuration file < `HOT_COFFEE_*`
//! environment variables < command-line flags (`--port`, `--dir`).

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::{OrthoConfig, OrthoError, is_display_request};
use serde::Deserialize;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 8080;
/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Settings for the order service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOT_COFFEE")]
pub struct HotCoffeeSettings {
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Directory holding `orders.json`.
    pub dir: Option<PathBuf>,
}

impl HotCoffeeSettings {
    /// Configured port, falling back to [`DEFAULT_PORT`].
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured data directory, falling back to [`DEFAULT_DATA_DIR`].
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    /// Address to bind: every IPv4 interface on the configured port.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port()))
    }
}

/// The `--help` or `--version` request behind a load failure, if any.
///
/// Clap reports these as errors; callers should print them and exit
/// successfully instead of treating them as bad input.
#[must_use]
pub fn display_request(err: &OrthoError) -> Option<&clap::Error> {
    match err {
        OrthoError::CliParsing(clap_err) if is_display_request(clap_err) => Some(&**clap_err),
        OrthoError::Aggregate(errors) => errors.iter().find_map(display_request),
        _ => None,
    }
}
