use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),
}

pub type Result<T> = std::result::Result<T, CommonError>;
