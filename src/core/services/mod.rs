pub mod category_service;

pub use category_service::{CategoryService, ConfirmGate, Deletion};

use crate::errors::KakeiboError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] KakeiboError),
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests;
