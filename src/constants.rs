/// Defaults and environment variable names shared across the crate

pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_STORE_PATH: &str = "data/companies.json";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_COMPANY_COUNT: usize = 100;
pub const DEFAULT_SERVER_PORT: u16 = 8050;

pub const ENV_OUTPUT_DIR: &str = "COMPANY_INSIGHTS_OUTPUT_DIR";
pub const ENV_STORE_PATH: &str = "COMPANY_INSIGHTS_STORE_PATH";
pub const ENV_PORT: &str = "COMPANY_INSIGHTS_PORT";
pub const ENV_METRICS_PORT: &str = "COMPANY_INSIGHTS_METRICS_PORT";

/// Document key assigned by the store
pub const DOCUMENT_ID_KEY: &str = "_id";

/// Export file stem for tabular output
pub const EXPORT_FILE_STEM: &str = "companies";
