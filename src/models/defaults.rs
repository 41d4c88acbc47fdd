use crate::LoggerFormat;

pub const DEFAULT_PAGE_SIZE: u16 = 10;

pub fn default_hash_cost() -> u32 {
    8
}

pub fn default_http_port() -> u16 {
    3000
}

pub fn default_token_expiry_secs() -> u64 {
    3600
}

pub fn default_static_dir() -> String {
    "./static".to_owned()
}

pub fn default_logger_format() -> LoggerFormat {
    LoggerFormat::Pretty
}
