//! # Ledger Analytics
//!
//! 정제 거래내역을 이동평균법으로 재생하여 실현손익과 보유 현황을
//! 계산하고, 계좌/포트폴리오 단위로 집계하는 크레이트입니다.
//!
//! 제공 기능:
//! - 이동평균 원가 재생 (계좌+종목 단위, 순서 엄수)
//! - 계좌별 현황 집계 (예수금, 운용자금, 실현손익)
//! - 전체 투자 현황 롤업 (평가 시점 재계산)
//! - 포트폴리오 목표 비중 대비 리밸런싱 계산
//! - 시세 조회 경계 (`PriceSource`)
//! - 정산 파이프라인 진입점 (`Reconciler`)

pub mod aggregator;
pub mod cost_basis;
pub mod engine;
pub mod overall;
pub mod portfolio;
pub mod price;

pub use aggregator::*;
pub use cost_basis::*;
pub use engine::*;
pub use overall::*;
pub use portfolio::*;
pub use price::*;
