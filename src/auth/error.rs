/*
 * Responsibility
 * - provider 登録 (起動時) の失敗を表す
 * - ルーティング中のエラーではない (dispatch は 404 しか返さない)
 */
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("auth provider name must not be empty")]
    EmptyProviderName,
    #[error("auth provider name must not contain '/': {0}")]
    InvalidProviderName(String),
    #[error("auth provider already registered: {0}")]
    DuplicateProvider(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
