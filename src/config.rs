use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{v_info, LikeResult, API_BASE_URL, API_LOG_FILE};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LikeStarConfig {
    pub api: ApiConfig,
    pub indicator: IndicatorConfig,
    pub toggle: ToggleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the likes API, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
    /// Append every API call to `api_log_path`
    pub api_logging: bool,
    pub api_log_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Classes applied when the cafe is liked
    pub filled_class: String,
    /// Classes applied when the cafe is not liked
    pub empty_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleConfig {
    /// Follow the confirmed like status across clicks. When false every
    /// click repeats the action chosen at load time and the star never changes.
    pub track_state: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            request_timeout_seconds: 30,
            api_logging: false,
            api_log_path: API_LOG_FILE.to_string(),
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            filled_class: "bi bi-star-fill".to_string(),
            empty_class: "bi bi-star".to_string(),
        }
    }
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self { track_state: true }
    }
}

impl LikeStarConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> LikeResult<Self> {
        if Path::new(config_path).exists() {
            v_info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: LikeStarConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path);
            let config = LikeStarConfig::default();
            config.save(config_path)?;
            v_info!("💡 Edit {} to point at another likes API", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> LikeResult<()> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(format!("base_url must be an http(s) URL, got '{}'", self.api.base_url));
        }
        if self.api.request_timeout_seconds == 0 {
            return Err("request_timeout_seconds must be greater than 0".to_string());
        }
        if self.api.api_logging && self.api.api_log_path.trim().is_empty() {
            return Err("api_log_path must be set when api_logging is enabled".to_string());
        }

        if self.indicator.filled_class.trim().is_empty() || self.indicator.empty_class.trim().is_empty() {
            return Err("filled_class and empty_class must not be empty".to_string());
        }
        if self.indicator.filled_class.trim() == self.indicator.empty_class.trim() {
            return Err("filled_class and empty_class must differ".to_string());
        }

        v_info!("✅ Configuration validation passed");
        Ok(())
    }

    pub fn print_summary(&self) {
        v_info!("📋 Configuration Summary:");
        v_info!("   🌐 Likes API: {}", self.api.base_url);
        v_info!("   ⏰ Request timeout: {}s", self.api.request_timeout_seconds);
        v_info!("   ⭐ Star classes: '{}' / '{}'", self.indicator.filled_class, self.indicator.empty_class);
        v_info!("   🔁 Track state across clicks: {}", self.toggle.track_state);
    }
}
