//! config-rs/lib.rs
//! Process-level configuration shared by SmartBridge binaries:
//! `.env` loading and bind address resolution

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Loopback: the UI is a single-user local tool unless overridden
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Port the web UI listens on by default
pub const DEFAULT_UI_PORT: u16 = 8501;

/// Load a `.env` file from the working directory or its parents, if present.
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            log::warn!("Failed to load .env file: {}", err);
            None
        }
    }
}

/// Get service port from environment variables with proper fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "SMARTBRIDGE")
/// * `default_port` - The default port to use if not specified in environment
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    match env::var(&var_name) {
        Ok(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Invalid port in {}, using default {}", var_name, default_port);
            default_port
        }),
        Err(_) => default_port,
    }
}

/// Create a SocketAddr for binding a service
///
/// `<SERVICE>_SERVICE_ADDR` wins when it holds a valid `host:port` (an
/// `http://` or `https://` scheme is tolerated); otherwise the address is
/// `DEFAULT_HOST` with the port from `get_service_port`.
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Ok(addr_str) = env::var(&var_name) {
        if let Some(addr) = parse_socket_addr(&addr_str) {
            return addr;
        }
        log::warn!("Invalid address format in {}, using default", var_name);
    }

    SocketAddr::new(DEFAULT_HOST, get_service_port(service_name, default_port))
}

fn parse_socket_addr(value: &str) -> Option<SocketAddr> {
    let trimmed = value.trim();
    let without_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or(trimmed);

    without_scheme.trim_end_matches('/').parse::<SocketAddr>().ok()
}

/// Get service name for logging and monitoring
pub fn get_formatted_service_name(service_name: &str) -> String {
    match service_name.to_uppercase().as_str() {
        "SMARTBRIDGE" => "smartbridge-ui".to_string(),
        other => format!("{}-service", other.to_lowercase().replace('_', "-")),
    }
}
