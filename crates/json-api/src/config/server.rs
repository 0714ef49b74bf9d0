//! Server Config

use clap::Args;

/// Where the JSON API listens.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind; IPv6 addresses are accepted without brackets
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, bracketing IPv6 hosts.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> ServerRuntimeConfig {
        ServerRuntimeConfig {
            host: host.to_string(),
            port: 8698,
        }
    }

    #[test]
    fn test_ipv4_host_is_joined_with_port() {
        assert_eq!(config("127.0.0.1").socket_addr(), "127.0.0.1:8698");
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        assert_eq!(config("::1").socket_addr(), "[::1]:8698");
        assert_eq!(config("[::1]").socket_addr(), "[::1]:8698");
    }
}
