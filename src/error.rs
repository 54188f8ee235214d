#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("AssumeRoleWithSAML failed for {role_arn}: {reason}")]
    ExchangeError { role_arn: String, reason: String },

    #[error("Delivery error: {0}")]
    DeliveryError(#[from] std::io::Error),
}
