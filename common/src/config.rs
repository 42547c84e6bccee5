use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

/// Runtime configuration loaded once from the environment.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub database_path: String,
    pub submission_storage_root: String,
    pub host: String,
    pub port: u16,
    /// Which scoring strategy the deployment uses: "shingle" or "token_diff".
    pub similarity_strategy: String,
    /// Reports scoring at or above this value trigger a reviewer notification.
    pub high_similarity_threshold: f64,
    /// Upper bound on a single submission's text extraction, in seconds.
    pub extraction_timeout_secs: u64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let project_name =
                env::var("PROJECT_NAME").unwrap_or_else(|_| "plagiarism-api".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/api.log".into());
            let database_path = env::var("DATABASE_PATH").expect("DATABASE_PATH must be set");
            let submission_storage_root = env::var("SUBMISSION_STORAGE_ROOT")
                .unwrap_or_else(|_| "data/submissions".into());
            let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
            let port = env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000);
            let similarity_strategy =
                env::var("SIMILARITY_STRATEGY").unwrap_or_else(|_| "shingle".into());
            let high_similarity_threshold = env::var("HIGH_SIMILARITY_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(70.0);
            let extraction_timeout_secs = env::var("EXTRACTION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30);

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }

            Config {
                project_name,
                log_level,
                log_file,
                database_path,
                submission_storage_root,
                host,
                port,
                similarity_strategy,
                high_similarity_threshold,
                extraction_timeout_secs,
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }
}
