//! # Ledger Reconcile
//!
//! 세 가지 이질적인 원본 피드(종합 거래원장, 국내 매매일지, 해외
//! 매매일지)를 대조하여 정제된 거래내역을 만드는 보정 크레이트입니다.
//!
//! 제공 기능:
//! - 거래종류 코드 분류 (자유 텍스트 → 닫힌 enum)
//! - 종목명 퍼지 해석 (토큰 중첩 점수)
//! - 결제일 → 매매일 보정
//! - 간접 증거 기반 유효 환율 추론
//! - 정제 거래내역 빌드 (1회 임포트 단위 일괄 변환)
//!
//! 모든 보정은 best-effort입니다. 해석 실패는 원본 값 유지로
//! 귀결되며 배치를 중단시키지 않습니다.

pub mod builder;
pub mod classify;
pub mod date_corrector;
pub mod fx;
pub mod name_resolver;

pub use builder::*;
pub use classify::*;
pub use date_corrector::*;
pub use fx::*;
pub use name_resolver::*;
