//! # Ledger Core
//!
//! 증권사 거래내역 정산 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 정산 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 원장/매매일지 원본 레코드 구조체
//! - 정제된 거래내역 및 거래 유형 정의
//! - 계좌별/종목별 현황 스냅샷
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
