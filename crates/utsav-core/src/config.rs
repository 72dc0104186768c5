//! Configuration module
//!
//! Configuration is read once at startup from environment variables (with
//! `.env` support via dotenvy) into a `Config` with compiled-in defaults.

use std::env;
use std::time::Duration;

use crate::models::SummaryStrategy;
use crate::retry::RetryPolicy;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_UPLOAD_BASE_URL: &str = "http://localhost:8080/uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_SUMMARY_API_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_SUMMARY_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
const DEFAULT_TRANSCRIBE_MODEL: &str = "openai/whisper-base";
const DEFAULT_CREDENTIALS_FILE: &str = "service-account.json";
const DEFAULT_DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
const DEFAULT_DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3";
const DEFAULT_DRIVE_ROOT_FOLDER: &str = "Utsav Uploads";
const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";
const DEFAULT_WORKSHEET_TITLE: &str = "Sheet1";
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 200;
const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5_000;
const DEFAULT_DRAFT_TTL_SECS: u64 = 3_600;

const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "mp3", "wav", "mp4", "txt", "pdf"];
const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/x-wav",
    "video/mp4",
    "text/plain",
    "application/pdf",
];

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    upload_dir: String,
    upload_base_url: String,
    max_upload_bytes: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
    summary_strategy: SummaryStrategy,
    summary_api_url: String,
    summary_model: String,
    transcribe_model: String,
    summary_api_key: Option<String>,
    credentials_file: String,
    credentials_json: Option<String>,
    drive_api_url: String,
    drive_upload_url: String,
    drive_root_folder: String,
    sheets_api_url: String,
    spreadsheet_id: Option<String>,
    worksheet_title: String,
    retry_max_attempts: u32,
    retry_base_delay_ms: u64,
    retry_max_delay_ms: u64,
    draft_ttl_secs: u64,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match env::var(key) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env_or("UTSAV_CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let summary_strategy_raw = env_or("UTSAV_SUMMARY_STRATEGY", "template");
        let summary_strategy = SummaryStrategy::parse(&summary_strategy_raw).ok_or_else(|| {
            anyhow::anyhow!(
                "UTSAV_SUMMARY_STRATEGY must be 'template' or 'model', got: {}",
                summary_strategy_raw
            )
        })?;

        Ok(Config {
            server_port: env_parse("UTSAV_PORT", DEFAULT_PORT)?,
            cors_origins,
            environment,
            upload_dir: env_or("UTSAV_UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            upload_base_url: env_or("UTSAV_UPLOAD_BASE_URL", DEFAULT_UPLOAD_BASE_URL),
            max_upload_bytes: env_parse("UTSAV_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            allowed_extensions: env_list("UTSAV_ALLOWED_EXTENSIONS", DEFAULT_ALLOWED_EXTENSIONS),
            allowed_content_types: env_list(
                "UTSAV_ALLOWED_CONTENT_TYPES",
                DEFAULT_ALLOWED_CONTENT_TYPES,
            ),
            summary_strategy,
            summary_api_url: env_or("UTSAV_SUMMARY_API_URL", DEFAULT_SUMMARY_API_URL),
            summary_model: env_or("UTSAV_SUMMARY_MODEL", DEFAULT_SUMMARY_MODEL),
            transcribe_model: env_or("UTSAV_TRANSCRIBE_MODEL", DEFAULT_TRANSCRIBE_MODEL),
            summary_api_key: env_opt("UTSAV_SUMMARY_API_KEY"),
            credentials_file: env_or("UTSAV_CREDENTIALS_FILE", DEFAULT_CREDENTIALS_FILE),
            credentials_json: env_opt("UTSAV_CREDENTIALS_JSON"),
            drive_api_url: env_or("UTSAV_DRIVE_API_URL", DEFAULT_DRIVE_API_URL),
            drive_upload_url: env_or("UTSAV_DRIVE_UPLOAD_URL", DEFAULT_DRIVE_UPLOAD_URL),
            drive_root_folder: env_or("UTSAV_DRIVE_ROOT_FOLDER", DEFAULT_DRIVE_ROOT_FOLDER),
            sheets_api_url: env_or("UTSAV_SHEETS_API_URL", DEFAULT_SHEETS_API_URL),
            spreadsheet_id: env_opt("UTSAV_SPREADSHEET_ID"),
            worksheet_title: env_or("UTSAV_WORKSHEET_TITLE", DEFAULT_WORKSHEET_TITLE),
            retry_max_attempts: env_parse("UTSAV_RETRY_MAX_ATTEMPTS", DEFAULT_RETRY_MAX_ATTEMPTS)?,
            retry_base_delay_ms: env_parse(
                "UTSAV_RETRY_BASE_DELAY_MS",
                DEFAULT_RETRY_BASE_DELAY_MS,
            )?,
            retry_max_delay_ms: env_parse("UTSAV_RETRY_MAX_DELAY_MS", DEFAULT_RETRY_MAX_DELAY_MS)?,
            draft_ttl_secs: env_parse("UTSAV_DRAFT_TTL_SECS", DEFAULT_DRAFT_TTL_SECS)?,
        })
    }

    /// Cross-field checks that cannot fail per-variable.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_bytes == 0 {
            anyhow::bail!("UTSAV_MAX_UPLOAD_BYTES must be greater than zero");
        }
        if self.allowed_extensions.is_empty() {
            anyhow::bail!("UTSAV_ALLOWED_EXTENSIONS must not be empty");
        }
        if self.allowed_content_types.is_empty() {
            anyhow::bail!("UTSAV_ALLOWED_CONTENT_TYPES must not be empty");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    pub fn upload_base_url(&self) -> &str {
        &self.upload_base_url
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    pub fn summary_strategy(&self) -> SummaryStrategy {
        self.summary_strategy
    }

    pub fn summary_api_url(&self) -> &str {
        &self.summary_api_url
    }

    pub fn summary_model(&self) -> &str {
        &self.summary_model
    }

    pub fn transcribe_model(&self) -> &str {
        &self.transcribe_model
    }

    pub fn summary_api_key(&self) -> Option<&str> {
        self.summary_api_key.as_deref()
    }

    pub fn credentials_file(&self) -> &str {
        &self.credentials_file
    }

    pub fn credentials_json(&self) -> Option<&str> {
        self.credentials_json.as_deref()
    }

    pub fn drive_api_url(&self) -> &str {
        &self.drive_api_url
    }

    pub fn drive_upload_url(&self) -> &str {
        &self.drive_upload_url
    }

    pub fn drive_root_folder(&self) -> &str {
        &self.drive_root_folder
    }

    pub fn sheets_api_url(&self) -> &str {
        &self.sheets_api_url
    }

    pub fn spreadsheet_id(&self) -> Option<&str> {
        self.spreadsheet_id.as_deref()
    }

    pub fn worksheet_title(&self) -> &str {
        &self.worksheet_title
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            Duration::from_millis(self.retry_max_delay_ms),
        )
    }

    pub fn draft_ttl(&self) -> Duration {
        Duration::from_secs(self.draft_ttl_secs)
    }

    /// Construct a config for tests without touching the process
    /// environment.
    pub fn for_tests(upload_dir: &str) -> Self {
        Config {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            upload_dir: upload_dir.to_string(),
            upload_base_url: "http://localhost:8080/uploads".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            summary_strategy: SummaryStrategy::Template,
            summary_api_url: DEFAULT_SUMMARY_API_URL.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            transcribe_model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
            summary_api_key: None,
            credentials_file: DEFAULT_CREDENTIALS_FILE.to_string(),
            credentials_json: None,
            drive_api_url: DEFAULT_DRIVE_API_URL.to_string(),
            drive_upload_url: DEFAULT_DRIVE_UPLOAD_URL.to_string(),
            drive_root_folder: DEFAULT_DRIVE_ROOT_FOLDER.to_string(),
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            spreadsheet_id: None,
            worksheet_title: DEFAULT_WORKSHEET_TITLE.to_string(),
            retry_max_attempts: 2,
            retry_base_delay_ms: 1,
            retry_max_delay_ms: 4,
            draft_ttl_secs: DEFAULT_DRAFT_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        let config = Config::for_tests("uploads");
        assert!(config.validate().is_ok());
        assert_eq!(config.max_upload_bytes(), 16 * 1024 * 1024);
        assert!(config
            .allowed_extensions()
            .contains(&"jpg".to_string()));
        assert!(!config.is_production());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = Config::for_tests("uploads");
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.base_delay, Duration::from_millis(1));
    }
}
