use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub content: ContentConfig,
    pub favorites: FavoritesConfig,
    pub leads: LeadsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub default_language: String,
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub related_items: i64,
    pub read_time_wpm: u32,
    pub price_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    pub share_code_prefix: String,
    pub max_comment_length: usize,
    pub max_alias_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadsConfig {
    pub max_name_length: usize,
    pub max_message_length: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment presets first, then specific env var overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        if let Ok(v) = env::var("CONTENT_DEFAULT_LANGUAGE") {
            self.content.default_language = v;
        }
        if let Ok(v) = env::var("CONTENT_DEFAULT_PAGE_SIZE") {
            self.content.default_page_size = v.parse().unwrap_or(self.content.default_page_size);
        }
        if let Ok(v) = env::var("CONTENT_MAX_PAGE_SIZE") {
            self.content.max_page_size = v.parse().unwrap_or(self.content.max_page_size);
        }
        if let Ok(v) = env::var("CONTENT_RELATED_ITEMS") {
            self.content.related_items = v.parse().unwrap_or(self.content.related_items);
        }
        if let Ok(v) = env::var("CONTENT_READ_TIME_WPM") {
            self.content.read_time_wpm = v.parse().unwrap_or(self.content.read_time_wpm);
        }
        if let Ok(v) = env::var("CONTENT_PRICE_PLACEHOLDER") {
            self.content.price_placeholder = v;
        }

        if let Ok(v) = env::var("FAVORITES_SHARE_CODE_PREFIX") {
            self.favorites.share_code_prefix = v;
        }
        if let Ok(v) = env::var("FAVORITES_MAX_COMMENT_LENGTH") {
            self.favorites.max_comment_length =
                v.parse().unwrap_or(self.favorites.max_comment_length);
        }

        if let Ok(v) = env::var("LEADS_MAX_MESSAGE_LENGTH") {
            self.leads.max_message_length = v.parse().unwrap_or(self.leads.max_message_length);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            content: ContentConfig {
                default_language: "es".to_string(),
                default_page_size: 12,
                max_page_size: 100,
                related_items: 4,
                read_time_wpm: 200,
                price_placeholder: "Precio a consultar".to_string(),
            },
            favorites: FavoritesConfig {
                share_code_prefix: "CLIC".to_string(),
                max_comment_length: 1000,
                max_alias_length: 60,
            },
            leads: LeadsConfig {
                max_name_length: 120,
                max_message_length: 2000,
            },
        }
    }

    fn staging() -> Self {
        Self {
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            environment: Environment::Staging,
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            content: ContentConfig {
                max_page_size: 50,
                ..Self::development().content
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.content.default_page_size, 12);
        assert_eq!(config.content.read_time_wpm, 200);
        assert_eq!(config.favorites.share_code_prefix, "CLIC");
    }

    #[test]
    fn production_tightens_page_cap() {
        let config = AppConfig::production();
        assert_eq!(config.content.max_page_size, 50);
        assert_eq!(config.database.max_connections, 50);
    }
}
