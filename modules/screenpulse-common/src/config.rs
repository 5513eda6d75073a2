use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres
    pub database_url: String,

    // Murmur social search
    pub murmur_api_token: String,

    // Categorical sentiment model service
    pub classifier_url: String,

    // Cinedex title reference
    pub cinedex_api_key: String,

    /// Ceiling on posts fetched from the social source per run.
    pub fetch_limit: u32,

    /// Posts per storage page while scanning.
    pub page_size: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            murmur_api_token: required_env("MURMUR_API_TOKEN"),
            classifier_url: required_env("CLASSIFIER_URL"),
            cinedex_api_key: required_env("CINEDEX_API_KEY"),
            fetch_limit: env::var("FETCH_LIMIT")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .expect("FETCH_LIMIT must be a number"),
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .expect("PAGE_SIZE must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
