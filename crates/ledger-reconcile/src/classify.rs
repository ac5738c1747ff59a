//! 거래종류 코드 분류.
//!
//! 증권사 원장의 자유 텍스트 거래종류 코드를 닫힌 [`TransactionKind`]
//! 집합으로 매핑합니다. 매핑표는 실제 증권사 내보내기 샘플에서 확인된
//! 코드를 기준으로 하며, 원본 코드는 정제 행의 `kind_detail`로 보존됩니다.

use ledger_core::TransactionKind;

/// 주식 실물 입출고 코드. 결제일이 매매일보다 늦으므로 일자 보정 대상입니다.
pub const STOCK_SETTLEMENT_LABELS: [&str; 5] = [
    "주식매도출고",
    "주식매수입고",
    "해외주식매도출고",
    "해외주식매수입고",
    "금현물매수입고",
];

/// ETF/상장클래스 분배금 입금 코드. 종목명 해석 대상입니다.
pub const DISTRIBUTION_LABEL: &str = "ETF/상장클래스 분배금입금";

/// 환전 매수의 원화 출금 leg.
pub const FX_BUY_KRW_OUT_LABEL: &str = "외화매수원화출금";

/// 환전 매수의 원화 출금 leg (미수 표기 변형).
pub const FX_BUY_KRW_OUT_CREDIT_LABEL: &str = "외화매수원화출금(미수)";

/// 환전 매수의 외화 입금 leg.
pub const FX_BUY_FOREIGN_IN_LABEL: &str = "외화매수외화입금";

/// 환전 매도의 외화 출금 leg.
pub const FX_SELL_FOREIGN_OUT_LABEL: &str = "외화매도외화출금";

/// 환전 매도의 원화 입금 leg.
pub const FX_SELL_KRW_IN_LABEL: &str = "외화매도원화입금";

/// 선환전 차액 조정 leg의 코드 접두사 (뒤에 상세 표기가 붙습니다).
pub const FX_DIFF_PREFIX: &str = "선환전차액";

/// 거래종류 코드를 canonical 분류로 매핑합니다.
///
/// 매핑되지 않는 코드는 `None`이며, 해당 행은 정제 대상에서 제외됩니다.
pub fn classify(label: &str) -> Option<TransactionKind> {
    use TransactionKind::*;

    let kind = match label {
        "주식매수입고" | "해외주식매수입고" | "금현물매수입고" => Buy,
        "외화매수원화출금" | "외화매수원화출금(미수)" => Buy,
        "주식매도출고" | "해외주식매도출고" | "외화매도외화출금" => Sell,
        "이체입금" | "계좌대체입금" => Deposit,
        "외화매수외화입금" | "외화매도원화입금" => Deposit,
        "이체송금" | "이체출금" | "계좌대체출금" => Withdrawal,
        "예탁금이용료입금" | "외화예탁금이용료입금" => Interest,
        "배당금입금" | "배당금외화입금" => Interest,
        "ETF/상장클래스 분배금입금" => Interest,
        "금현물보관수수료" => Fee,
        "배당세출금" | "금현물보관수수료세금" => Tax,
        _ => return None,
    };
    Some(kind)
}

/// 거래종류 코드를 정규화합니다.
///
/// 미수 표기가 붙은 환전 매수 leg는 일반 표기로 통일합니다.
pub fn normalize_label(label: &str) -> &str {
    if label == FX_BUY_KRW_OUT_CREDIT_LABEL {
        FX_BUY_KRW_OUT_LABEL
    } else {
        label
    }
}

/// 주식 실물 입출고 코드인지 확인합니다.
pub fn is_stock_settlement(label: &str) -> bool {
    STOCK_SETTLEMENT_LABELS.contains(&label)
}
