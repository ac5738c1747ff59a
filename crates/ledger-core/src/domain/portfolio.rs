//! 포트폴리오 목표 비중과 리밸런싱 계산 결과.

use crate::types::{Percentage, Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 종목별 목표 비중 (사용자 입력).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTarget {
    /// 종목코드
    pub code: String,
    /// 목표 비중 (%, 예: 25.0)
    pub target_weight: Percentage,
}

impl PortfolioTarget {
    /// 새 목표 비중을 생성합니다.
    pub fn new(code: impl Into<String>, target_weight: Percentage) -> Self {
        Self {
            code: code.into(),
            target_weight,
        }
    }
}

/// 평가 시점에 계산된 포트폴리오 항목.
///
/// 모든 비중/조정 수치는 평가 갱신 때마다 다시 계산되며 영속화하지
/// 않습니다 (파생의 파생 상태를 저장하지 않음).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    /// 종목코드
    pub code: String,
    /// 종목명 (표시용)
    pub name: String,
    /// 목표 비중 (%)
    pub target_weight: Percentage,
    /// 목표 금액 (기준금액 × 목표비중)
    pub target_amount: Decimal,
    /// 평가 금액 (현재가 × 수량, 원화 환산)
    pub evaluation_amount: Decimal,
    /// 현재 비중 (%, 전체 평가금액 대비)
    pub current_weight: Percentage,
    /// 투자 금액 (이동평균 원가 기준 잔여 원금)
    pub invested_amount: Decimal,
    /// 조정 금액 (목표 금액 - 평가 금액)
    pub adjustment_amount: Decimal,
    /// 조정 비율 (%, 평가 금액 대비)
    pub adjustment_rate: Percentage,
    /// 현재가
    pub current_price: Price,
    /// 보유수량
    pub quantity: Quantity,
    /// 통화
    pub currency: String,
}

/// 포트폴리오 전체 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// 항목 목록
    pub items: Vec<PortfolioItem>,
    /// 기준금액 (이체입금 합계)
    pub total_base_amount: Decimal,
    /// 총 평가금액
    pub total_evaluation_amount: Decimal,
    /// 총 투자금액
    pub total_invested_amount: Decimal,
    /// 목표 비중 합계 (%)
    pub total_target_weight: Percentage,
}
