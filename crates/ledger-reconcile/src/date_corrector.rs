//! 결제일 → 매매일 보정.
//!
//! 주식 실물 입출고의 원장 일자는 결제일(T+2)이라 실제 체결일보다
//! 늦습니다. 매매일지에서 같은 계좌/종목의 결제일 이전 최근 매매일을
//! 찾아 보정합니다.

use chrono::NaiveDate;
use ledger_core::{OverseasTradeLogEntry, TradeLogEntry};

/// 결제일에 대응하는 실제 매매일을 찾습니다.
///
/// 국내 매매일지에서 `(계좌, 종목명)`이 일치하고 `매매일 <= 결제일`인
/// 항목 중 가장 늦은 날짜를 취하고, 없으면 해외 매매일지에서 같은
/// 방식으로 찾습니다. 둘 다 없으면 `None`이며 호출자는 결제일을
/// 그대로 사용합니다 (에러 아님).
pub fn correct_date(
    trade_logs: &[TradeLogEntry],
    overseas_logs: &[OverseasTradeLogEntry],
    account: &str,
    name: &str,
    settlement_date: NaiveDate,
) -> Option<NaiveDate> {
    trade_logs
        .iter()
        .filter(|log| {
            log.account == account && log.name == name && log.trade_date <= settlement_date
        })
        .map(|log| log.trade_date)
        .max()
        .or_else(|| {
            overseas_logs
                .iter()
                .filter(|log| {
                    log.account == account && log.name == name && log.trade_date <= settlement_date
                })
                .map(|log| log.trade_date)
                .max()
        })
}
