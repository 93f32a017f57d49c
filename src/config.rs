use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

impl ServerConfig {
    /// `.env.local`/`.env` are loaded first; CLI flags win over the environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    pub fn from_sources(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Self {
        let mut cfg = Self::default();

        if let Some(host) = env("DASHBOARD_HOST").and_then(non_empty) {
            cfg.host = host;
        }
        if let Some(port) = env("DASHBOARD_PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            cfg.port = port;
        }
        if let Some(debug) = env("DASHBOARD_DEBUG") {
            cfg.debug = parse_flag(&debug);
        }

        if let Some(host) = arg_value(args, "--host").and_then(non_empty) {
            cfg.host = host;
        }
        if let Some(port) = arg_value(args, "--port").and_then(|v| v.trim().parse::<u16>().ok()) {
            cfg.port = port;
        }
        if args.iter().any(|a| a == "--debug") {
            cfg.debug = true;
        }
        cfg
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse::<IpAddr>()
                .with_context(|| format!("invalid host address {:?}", self.host))?
        };
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
        {
            return Some(next.clone());
        }
    }
    None
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
