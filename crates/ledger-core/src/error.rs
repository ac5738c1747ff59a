//! 정산 시스템의 에러 타입.
//!
//! 정산 자체는 best-effort로 동작하며 개별 행의 보정 실패는 에러가 아닙니다.
//! 이 모듈의 에러는 설정/입력 형태 등 호출자에게 알려야 하는 문제만 다룹니다.

use thiserror::Error;

/// 핵심 정산 에러.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 입력 데이터 에러
    #[error("입력 에러: {0}")]
    Input(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 정산 작업을 위한 Result 타입.
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// 호출자가 입력을 고쳐서 재시도할 수 있는 에러인지 확인합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::Config(_) | LedgerError::Input(_))
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LedgerError {
    fn from(err: config::ConfigError) -> Self {
        LedgerError::Config(err.to_string())
    }
}
