//! Hot Coffee entry point: loads settings, installs logging, serves HTTP.

mod server;

use std::ffi::OsString;
use std::io::{self, Write};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hot_coffee::inbound::http::health::HealthState;
use hot_coffee::settings::{HotCoffeeSettings, display_request};
use server::{ServerConfig, create_server};

fn load_settings() -> HotCoffeeSettings {
    let args: Vec<OsString> = std::env::args_os().collect();
    match HotCoffeeSettings::load_from_iter(args) {
        Ok(settings) => settings,
        Err(err) => {
            if let Some(request) = display_request(&err) {
                // Prints help or version to stdout and exits with status 0.
                request.exit();
            }
            let _write_result = writeln!(io::stderr(), "{err}");
            std::process::exit(2);
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = load_settings();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from(&settings);
    info!(
        port = settings.port(),
        data_dir = %config.data_dir().display(),
        "starting hot-coffee"
    );

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
