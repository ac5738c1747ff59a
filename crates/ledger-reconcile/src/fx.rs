//! 간접 증거 기반 유효 환율 추론.
//!
//! 환전 거래는 원장에 원화 leg와 외화 leg 두 행(+선환전 차액 조정
//! 행)으로 기록될 뿐 환율 자체는 없습니다. 같은 계좌/일자의 관련
//! leg 금액을 맞춰 유효 환율을 역산합니다.

use chrono::NaiveDate;
use ledger_core::RawTransaction;
use rust_decimal::Decimal;

use crate::classify::{FX_BUY_FOREIGN_IN_LABEL, FX_DIFF_PREFIX, FX_SELL_FOREIGN_OUT_LABEL};

/// 환전 거래의 유효 환율을 역산합니다.
///
/// 같은 `(계좌, 결제일)`의 행들로 범위를 좁힌 뒤:
/// - 외화 합계 = 외화 leg("외화매수외화입금" 또는 "외화매도외화출금")의 외화거래금액
/// - 조정액 = "선환전차액"으로 시작하는 leg의 거래금액
/// - 환율 = (원화 금액 + 조정액) / 외화 합계
///
/// 외화 leg가 없거나 외화 합계가 0이면 0을 반환합니다. 호출자는
/// 0 환율을 "원본 단가 유지"로 취급해야 하며 절대 나누기에 쓰면
/// 안 됩니다.
pub fn effective_rate(
    rows: &[RawTransaction],
    account: &str,
    date: NaiveDate,
    local_amount: Decimal,
) -> Decimal {
    let related: Vec<&RawTransaction> = rows
        .iter()
        .filter(|row| row.account == account && row.settlement_date == date)
        .collect();

    let foreign_total = related
        .iter()
        .find(|row| {
            row.kind_label == FX_BUY_FOREIGN_IN_LABEL
                || row.kind_label == FX_SELL_FOREIGN_OUT_LABEL
        })
        .map(|row| row.foreign_amount)
        .unwrap_or(Decimal::ZERO);

    let fx_difference = related
        .iter()
        .find(|row| row.kind_label.starts_with(FX_DIFF_PREFIX))
        .map(|row| row.amount)
        .unwrap_or(Decimal::ZERO);

    if foreign_total.is_zero() {
        tracing::debug!(account, %date, "유효 환율 미상, 원본 단가 유지");
        return Decimal::ZERO;
    }

    (local_amount + fx_difference) / foreign_total
}
