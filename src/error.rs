use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelpqError {
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] crate::wizard::WizardError),

    #[error("No authenticated user; log in at {0}")]
    LoginRequired(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, HelpqError>;
