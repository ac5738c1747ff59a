//! 정밀한 금융 계산을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 수량을 위한 타입.
pub type Quantity = Decimal;

/// 퍼센트 타입 (5.25 = 5.25%).
pub type Percentage = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (사사오입).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 잔존 오차 범위 내의 값인지 확인합니다.
    ///
    /// 반복 매도 후 남는 부동 잔량(예: 0.0000003)을 0으로 스냅할지
    /// 판단하는 데 사용합니다.
    fn is_negligible(&self, epsilon: Decimal) -> bool;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn is_negligible(&self, epsilon: Decimal) -> bool {
        self.abs() <= epsilon
    }
}
