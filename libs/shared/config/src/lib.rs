use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_host: String,
    pub bind_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_host = env::var("BIND_HOST").unwrap_or_else(|_| {
            warn!("BIND_HOST not set, defaulting to 0.0.0.0");
            "0.0.0.0".to_string()
        });

        let bind_port = env::var("BIND_PORT")
            .ok()
            .and_then(|raw| match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("BIND_PORT is not a valid port number, defaulting to 3000");
                    None
                }
            })
            .unwrap_or(3000);

        Self {
            bind_host,
            bind_port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 3000,
        }
    }
}
