//! 정제된 거래내역과 거래 유형.
//!
//! 원장 원본 행의 자유 텍스트 거래종류는 경계에서 닫힌 enum으로
//! 분류되며, 감사 추적을 위해 원본 코드(`kind_detail`)를 함께 보존합니다.

use crate::types::{Percentage, Price, Quantity};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 이체입금 거래종류 코드. 원금 집계는 이 코드만 원금으로 셉니다.
pub const WIRE_IN_LABEL: &str = "이체입금";

/// 이체출금 거래종류 코드. 증권사 버전에 따라 두 표기가 모두 존재합니다.
pub const WIRE_OUT_LABELS: [&str; 2] = ["이체송금", "이체출금"];

/// 계좌 전체 합계 행에 쓰이는 합성 계좌명.
pub const ALL_ACCOUNTS: &str = "전체";

/// 거래의 의미적 분류 (닫힌 집합).
///
/// 모든 원본 거래종류 코드는 이 중 하나로 매핑되며, 매핑되지 않는
/// 코드의 행은 정제 대상에서 제외됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// 매수
    Buy,
    /// 매도
    Sell,
    /// 입금
    Deposit,
    /// 출금
    Withdrawal,
    /// 이자 (배당 포함)
    Interest,
    /// 수수료
    Fee,
    /// 세금
    Tax,
}

impl TransactionKind {
    /// 매수/매도 여부를 확인합니다.
    pub fn is_trade(&self) -> bool {
        matches!(self, TransactionKind::Buy | TransactionKind::Sell)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionKind::Buy => "매수",
            TransactionKind::Sell => "매도",
            TransactionKind::Deposit => "입금",
            TransactionKind::Withdrawal => "출금",
            TransactionKind::Interest => "이자",
            TransactionKind::Fee => "수수료",
            TransactionKind::Tax => "세금",
        };
        write!(f, "{}", label)
    }
}

/// 정산 1회분의 보정을 마친 거래내역 행.
///
/// 원본 원장 행 하나당 한 행이 생성되며, 종목명/일자/금액/환율이
/// 보정된 상태입니다. 매 정산마다 이전 결과 전체를 교체합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedTransaction {
    /// 계좌
    pub account: String,
    /// 매매일자 (보정 완료)
    pub trade_date: NaiveDate,
    /// 거래 분류
    pub kind: TransactionKind,
    /// 정규화된 원본 거래종류 코드 (감사용)
    pub kind_detail: String,
    /// 종목코드 (미해결이면 빈 문자열)
    pub code: String,
    /// 종목명 (보정 완료)
    pub name: String,
    /// 단가 (환전 leg는 유효 환율)
    pub price: Price,
    /// 수량
    pub quantity: Quantity,
    /// 수수료
    pub fee: Decimal,
    /// 세금
    pub tax: Decimal,
    /// 결제금액 (해당 통화 기준)
    pub amount: Decimal,
    /// 손익금액 (매매일지에서 대조, 없으면 0)
    pub profit_loss: Decimal,
    /// 수익률 (매매일지에서 대조, 없으면 0)
    pub yield_rate: Percentage,
    /// 통화코드 (기본 KRW)
    pub currency_code: String,
    /// 원본 거래번호 (재생 순서 보조 키)
    pub order_no: String,
}

impl CorrectedTransaction {
    /// 수수료와 세금을 차감한 순금액을 반환합니다.
    pub fn net_amount(&self) -> Decimal {
        self.amount - self.fee - self.tax
    }

    /// 이체입금(외부 자금 유입) 여부를 확인합니다.
    pub fn is_wire_in(&self) -> bool {
        self.kind_detail == WIRE_IN_LABEL
    }

    /// 이체출금(외부 자금 유출) 여부를 확인합니다.
    pub fn is_wire_out(&self) -> bool {
        WIRE_OUT_LABELS.contains(&self.kind_detail.as_str())
    }

    /// 배당금 입금 여부를 확인합니다.
    pub fn is_dividend(&self) -> bool {
        self.kind_detail.contains("배당금") && self.kind == TransactionKind::Interest
    }

    /// 예탁금 이용료(이자 수익) 여부를 확인합니다.
    pub fn is_deposit_interest(&self) -> bool {
        matches!(
            self.kind_detail.as_str(),
            "예탁금이용료입금" | "외화예탁금이용료입금"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(kind: TransactionKind, detail: &str) -> CorrectedTransaction {
        CorrectedTransaction {
            account: "1111".to_string(),
            trade_date: "2024-03-05".parse().unwrap(),
            kind,
            kind_detail: detail.to_string(),
            code: String::new(),
            name: String::new(),
            price: Decimal::ZERO,
            quantity: Decimal::ZERO,
            fee: dec!(100),
            tax: dec!(50),
            amount: dec!(10000),
            profit_loss: Decimal::ZERO,
            yield_rate: Decimal::ZERO,
            currency_code: "KRW".to_string(),
            order_no: "1".to_string(),
        }
    }

    #[test]
    fn test_net_amount() {
        let tx = sample(TransactionKind::Sell, "주식매도출고");
        assert_eq!(tx.net_amount(), dec!(9850));
    }

    #[test]
    fn test_wire_transfer_detection() {
        assert!(sample(TransactionKind::Deposit, "이체입금").is_wire_in());
        assert!(sample(TransactionKind::Withdrawal, "이체송금").is_wire_out());
        assert!(sample(TransactionKind::Withdrawal, "이체출금").is_wire_out());
        assert!(!sample(TransactionKind::Deposit, "계좌대체입금").is_wire_in());
    }

    #[test]
    fn test_dividend_detection() {
        assert!(sample(TransactionKind::Interest, "배당금외화입금").is_dividend());
        assert!(!sample(TransactionKind::Tax, "배당세출금").is_dividend());
        assert!(sample(TransactionKind::Interest, "예탁금이용료입금").is_deposit_interest());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Buy.to_string(), "매수");
        assert_eq!(TransactionKind::Interest.to_string(), "이자");
        assert!(TransactionKind::Sell.is_trade());
        assert!(!TransactionKind::Deposit.is_trade());
    }
}
