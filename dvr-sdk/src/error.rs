use thiserror::Error;

use crate::logging::LoggingError;
use crate::settings::SettingsError;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    ApiError(#[from] dvr_api::ApiError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("No device configured")]
    NoDevice,

    #[error("{0} has no {1}")]
    MissingField(&'static str, &'static str),
}

pub type Result<T> = std::result::Result<T, SdkError>;
