use std::env;

/// Server-side settings read from the environment at startup. The site
/// address itself comes from the Leptos configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_path: String,
    /// Seeds the referenced collections with demo rows on an empty database.
    pub seed_demo_data: bool,
}

impl ServerConfig {
    pub const DEFAULT_DATABASE_PATH: &'static str = "deliverydesk.db";

    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_path = lookup("DATABASE_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATABASE_PATH.to_string());
        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            database_path,
            seed_demo_data,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::default();
        assert_eq!(config.database_path, "deliverydesk.db");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "DATABASE_PATH" => Some("/var/lib/deliverydesk/reviews.db".into()),
            "SEED_DEMO_DATA" => Some("true".into()),
            _ => None,
        });
        assert_eq!(config.database_path, "/var/lib/deliverydesk/reviews.db");
        assert!(config.seed_demo_data);
    }

    #[test]
    fn blank_path_falls_back() {
        let config = ServerConfig::from_lookup(|key| (key == "DATABASE_PATH").then(|| "  ".to_string()));
        assert_eq!(config.database_path, ServerConfig::DEFAULT_DATABASE_PATH);
    }
}
