//! 계좌별/종목별 파생 현황 스냅샷.
//!
//! 모든 현황은 정산 1회마다 전체가 다시 계산되어 통째로 교체됩니다.
//! 부분 갱신은 없습니다 (읽기 일관성 우선).

use crate::types::{Percentage, Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 계좌+종목 단위 현황.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStockStatus {
    /// 계좌
    pub account: String,
    /// 종목코드
    pub code: String,
    /// 보유수량
    pub quantity: Quantity,
    /// 매입평균단가
    pub average_price: Price,
    /// 투자금액 (현재 보유분 원가)
    pub investment_amount: Decimal,
    /// 실현손익
    pub realized_pnl: Decimal,
    /// 실현손익률 (매도원가 가중평균)
    pub realized_pnl_rate: Percentage,
    /// 통화코드
    pub currency_code: String,
}

/// 계좌 단위 현황.
///
/// 계좌별 행에 더해 합성 "전체" 행이 추가됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    /// 계좌 (합계 행은 "전체")
    pub account: String,
    /// 운용자금 (보유 종목 투자금액 합계)
    pub operating_funds: Decimal,
    /// 실현손익
    pub realized_pnl: Decimal,
    /// 실현손익률 합계
    pub realized_pnl_rate: Percentage,
    /// 원화예수금
    pub krw_deposit: Decimal,
    /// 달러예수금
    pub usd_deposit: Decimal,
}

/// 전체 투자 현황 롤업 행 (평가 시점 재계산, 비영속).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    /// 행 제목 (예: "총투자내역")
    pub title: String,
    /// 원금 (매수원금 또는 순입금액)
    pub principal: Decimal,
    /// 평가자산 (평가금액 + 예수금)
    pub evaluated_assets: Decimal,
    /// 운용금액 (현재 보유 종목의 매수 원금 합계)
    pub operating_amount: Decimal,
    /// 평가금액 (현재가 × 수량)
    pub evaluated_amount: Decimal,
    /// 평가수익 (평가금액 - 운용금액)
    pub evaluated_profit: Decimal,
    /// 실현손익 (매도손익 + 배당 + 이자)
    pub realized_profit: Decimal,
    /// 예수금
    pub deposit: Decimal,
}

impl OverallStats {
    /// 제목만 있는 빈 행을 생성합니다.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            principal: Decimal::ZERO,
            evaluated_assets: Decimal::ZERO,
            operating_amount: Decimal::ZERO,
            evaluated_amount: Decimal::ZERO,
            evaluated_profit: Decimal::ZERO,
            realized_profit: Decimal::ZERO,
            deposit: Decimal::ZERO,
        }
    }
}
