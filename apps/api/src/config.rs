use anyhow::{Context, Result};

pub const DEFAULT_FILE_PREFIX: &str = "Curriculum_Vitae";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so startup only fails on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Download filename prefix; a timestamp and `.docx` are appended.
    pub file_prefix: String,
    /// Hex override for hyperlink runs. Invalid values fall back to black.
    pub link_color: Option<String>,
    /// Draw the rule under section headings.
    pub heading_rules: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            file_prefix: optional_env("CV_FILE_PREFIX")
                .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
            link_color: optional_env("CV_LINK_COLOR"),
            heading_rules: match optional_env("CV_HEADING_RULES") {
                Some(raw) => parse_flag(&raw)
                    .with_context(|| format!("CV_HEADING_RULES must be a boolean, got '{raw}'"))?,
                None => true,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            link_color: None,
            heading_rules: true,
        }
    }
}

/// Set and non-blank, trimmed.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.file_prefix, "Curriculum_Vitae");
        assert!(config.heading_rules);
        assert!(config.link_color.is_none());
    }
}
