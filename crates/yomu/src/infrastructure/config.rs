use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::catalogue::CatalogueSettings;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_uploads_url")]
    pub uploads_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_state_path")]
    pub state_path: String,
    #[serde(default = "default_preferred_language")]
    pub preferred_language: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_content_rating")]
    pub content_rating: Vec<String>,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default = "default_data_saver")]
    pub data_saver: bool,
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,
    #[serde(default = "default_max_feed_pages")]
    pub max_feed_pages: usize,
    #[serde(default)]
    pub history_limit: Option<usize>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: yomu_home().join("config.yml"),
            api_url: default_api_url(),
            uploads_url: default_uploads_url(),
            auth_url: default_auth_url(),
            client_id: None,
            client_secret: None,
            state_path: default_state_path(),
            preferred_language: default_preferred_language(),
            languages: default_languages(),
            content_rating: default_content_rating(),
            page_size: default_page_size(),
            data_saver: default_data_saver(),
            placeholder_url: default_placeholder_url(),
            max_feed_pages: default_max_feed_pages(),
            history_limit: None,
            user_agent: default_user_agent(),
        }
    }
}

fn yomu_home() -> PathBuf {
    match std::env::var("YOMU_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir().unwrap_or_default().join(".yomu"),
    }
}

fn default_api_url() -> String {
    "https://api.mangadex.org".to_string()
}

fn default_uploads_url() -> String {
    "https://uploads.mangadex.org".to_string()
}

fn default_auth_url() -> String {
    "https://auth.mangadex.org".to_string()
}

fn default_state_path() -> String {
    yomu_home().join("state").display().to_string()
}

fn default_preferred_language() -> String {
    "en".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_content_rating() -> Vec<String> {
    vec!["safe".to_string(), "suggestive".to_string()]
}

fn default_page_size() -> i64 {
    12
}

fn default_data_saver() -> bool {
    true
}

fn default_placeholder_url() -> String {
    "https://placehold.co/256x360?text=No+Cover".to_string()
}

fn default_max_feed_pages() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("yomu/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => yomu_home().join("config.yml"),
        };

        match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("Open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("Write default config at {:?}", cfg.path);
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    pub fn catalogue_settings(&self) -> CatalogueSettings {
        CatalogueSettings {
            page_size: self.page_size.max(1),
            data_saver: self.data_saver,
            max_feed_pages: self.max_feed_pages,
            placeholder_url: self.placeholder_url.clone(),
        }
    }

    pub fn http_client(&self) -> Result<reqwest::Client, anyhow::Error> {
        Ok(reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .build()?)
    }
}
