use crate::*;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct EnvConfig {
    pub database_url: String,
    pub http_host: String,
    #[serde(default = "models::defaults::default_http_port")]
    pub http_port: u16,
    #[serde(default = "models::defaults::default_hash_cost")]
    pub hash_cost: u32,
    #[serde(default = "models::defaults::default_logger_format")]
    pub logger_format: LoggerFormat,
    pub jwt_key: String,
    #[serde(default = "models::defaults::default_token_expiry_secs")]
    pub token_expiry_secs: u64,
    #[serde(default = "models::defaults::default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub serve_static: bool,
}
