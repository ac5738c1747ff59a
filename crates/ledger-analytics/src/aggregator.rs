//! 계좌별 현황 집계.
//!
//! 정제 거래내역과 종목 현황을 계좌 단위 예수금/운용자금/실현손익 행으로
//! 합산하고 마지막에 "전체" 합계 행을 덧붙입니다.

use ledger_core::{
    AccountStatus, AccountStockStatus, CorrectedTransaction, TransactionKind, ALL_ACCOUNTS,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 거래 하나의 예수금 변동액.
///
/// 매수/매도 금액에는 이미 수수료/세금이 반영되어 있고, 배당은 구분이
/// 이자로 들어오므로 별도 취급하지 않습니다. 세금 차감은 이자 구분에만
/// 적용합니다.
fn deposit_delta(tx: &CorrectedTransaction) -> Decimal {
    match tx.kind {
        TransactionKind::Deposit | TransactionKind::Sell => tx.amount,
        TransactionKind::Interest => tx.amount - tx.tax,
        TransactionKind::Withdrawal | TransactionKind::Buy => -tx.amount,
        _ => Decimal::ZERO,
    }
}

/// 계좌별 현황 행을 계산합니다.
///
/// - 예수금: (계좌, 통화) 그룹별 변동액 합계. KRW/USD 컬럼으로만 노출
///   합니다 (그 외 통화는 원본과 동일하게 무시).
/// - 운용자금: 해당 계좌 종목 현황의 잔여 투자금액 합계.
/// - 실현손익: 종목 현황 실현손익 합계, 손익률은 종목별 손익률 합산.
///
/// 거래가 없으면 빈 벡터를 반환하고, 결과가 있으면 끝에 "전체" 행을
/// 덧붙입니다.
pub fn account_statuses(
    transactions: &[CorrectedTransaction],
    stock_statuses: &[AccountStockStatus],
) -> Vec<AccountStatus> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let mut deposits: BTreeMap<(&str, &str), Decimal> = BTreeMap::new();
    for tx in transactions {
        let currency = if tx.currency_code.is_empty() {
            "KRW"
        } else {
            tx.currency_code.as_str()
        };
        *deposits.entry((tx.account.as_str(), currency)).or_default() += deposit_delta(tx);
    }

    #[derive(Default)]
    struct StockMetrics {
        realized_pnl: Decimal,
        total_investment: Decimal,
        pnl_rate_sum: Decimal,
    }

    let mut metrics: BTreeMap<&str, StockMetrics> = BTreeMap::new();
    for status in stock_statuses {
        let entry = metrics.entry(status.account.as_str()).or_default();
        entry.realized_pnl += status.realized_pnl;
        entry.total_investment += status.investment_amount;
        entry.pnl_rate_sum += status.realized_pnl_rate;
    }

    let mut accounts: Vec<&str> = deposits
        .keys()
        .map(|(account, _)| *account)
        .chain(metrics.keys().copied())
        .collect();
    accounts.sort_unstable();
    accounts.dedup();

    let mut statuses: Vec<AccountStatus> = accounts
        .into_iter()
        .map(|account| {
            let krw_deposit = deposits.get(&(account, "KRW")).copied().unwrap_or_default();
            let usd_deposit = deposits.get(&(account, "USD")).copied().unwrap_or_default();
            let account_metrics = metrics.get(account);

            AccountStatus {
                account: account.to_string(),
                // 운용자금 = 현재 종목들에 남아 있는 투자금액 합계
                operating_funds: account_metrics
                    .map(|m| m.total_investment)
                    .unwrap_or_default(),
                realized_pnl: account_metrics.map(|m| m.realized_pnl).unwrap_or_default(),
                realized_pnl_rate: account_metrics
                    .map(|m| m.pnl_rate_sum)
                    .unwrap_or_default(),
                krw_deposit,
                usd_deposit,
            }
        })
        .collect();

    let total = AccountStatus {
        account: ALL_ACCOUNTS.to_string(),
        operating_funds: statuses.iter().map(|s| s.operating_funds).sum(),
        realized_pnl: statuses.iter().map(|s| s.realized_pnl).sum(),
        realized_pnl_rate: statuses.iter().map(|s| s.realized_pnl_rate).sum(),
        krw_deposit: statuses.iter().map(|s| s.krw_deposit).sum(),
        usd_deposit: statuses.iter().map(|s| s.usd_deposit).sum(),
    };
    statuses.push(total);

    tracing::info!(accounts = statuses.len() - 1, "계좌 현황 집계 완료");

    statuses
}
