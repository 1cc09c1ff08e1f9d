use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SquelchConfig {
    pub gateway: GatewaySection,
}

/// Listener settings for the signaling gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    /// Address to bind the HTTP/WebSocket listener to.
    pub bind: String,

    /// TCP port.
    pub port: u16,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_listener() {
        let config = SquelchConfig::default();
        assert_eq!(config.gateway.bind, "127.0.0.1");
        assert_eq!(config.gateway.port, 3000);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: SquelchConfig = toml::from_str("[gateway]\nport = 4444\n").unwrap();
        assert_eq!(config.gateway.port, 4444);
        assert_eq!(config.gateway.bind, "127.0.0.1");
    }
}
