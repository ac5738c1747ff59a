//! 전체 투자 현황 롤업.
//!
//! 정제 거래내역을 원금/예수금/실현손익 축으로 한 번 훑고, 종목별 간이
//! 통계를 분산투자(포트폴리오 대상)와 개별투자로 나눠 합산한 뒤 다섯
//! 개의 제목 행으로 돌려줍니다. 외화 금액은 표시 환율로 원화에
//! 합산합니다 (거래 시점 환율 추정과는 별개).

use crate::cost_basis::stock_stats;
use crate::price::{resolve_price, PriceSource};
use ledger_core::{
    CorrectedTransaction, DisplayConfig, EngineConfig, Instrument, OverallStats, TransactionKind,
};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

/// 총투자내역 행 제목
pub const TITLE_TOTAL: &str = "총투자내역";
/// 주식투자내역 행 제목
pub const TITLE_STOCK: &str = "주식투자내역";
/// 분산투자내역 행 제목
pub const TITLE_DIVERSIFIED: &str = "분산투자내역";
/// 개별투자내역 행 제목
pub const TITLE_INDIVIDUAL: &str = "개별투자내역";
/// 예금투자내역 행 제목
pub const TITLE_DEPOSIT: &str = "예금투자내역";

#[derive(Default)]
struct CategoryTotals {
    operating: Decimal,
    evaluated: Decimal,
    realized: Decimal,
}

/// 전체 투자 현황 다섯 행을 계산합니다.
///
/// 행 순서는 총투자내역, 주식투자내역, 분산투자내역, 개별투자내역,
/// 예금투자내역으로 고정입니다.
///
/// - 원금은 이체입금/이체출금만 반영합니다 (그 외 입출금 구분은 계좌
///   사이 이동으로 간주).
/// - 예수금은 매수/매도/배당/예탁금이용료의 수수료/세금까지 반영한
///   순변동 누적입니다.
/// - 예탁금이용료는 예금투자내역의 실현손익으로 따로 집계합니다.
pub fn overall_stats(
    transactions: &[CorrectedTransaction],
    portfolio_codes: &BTreeSet<String>,
    instruments: &[Instrument],
    price_source: &dyn PriceSource,
    config: &EngineConfig,
    display: &DisplayConfig,
) -> Vec<OverallStats> {
    let mut total_deposit = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut deposit_interest_profit = Decimal::ZERO;

    for tx in transactions {
        let amount = display.to_krw(tx.amount, &tx.currency_code);
        let net = display.to_krw(tx.net_amount(), &tx.currency_code);

        if tx.is_wire_in() {
            total_deposit += amount;
            total_principal += amount;
        } else if tx.is_wire_out() {
            total_deposit -= amount;
            total_principal -= amount;
        } else if tx.kind == TransactionKind::Buy {
            total_deposit -= display.to_krw(tx.amount + tx.fee + tx.tax, &tx.currency_code);
        } else if tx.kind == TransactionKind::Sell {
            total_deposit += net;
        } else if tx.is_dividend() {
            total_deposit += net;
        } else if tx.is_deposit_interest() {
            total_deposit += net;
            deposit_interest_profit += net;
        }
    }

    let instrument_map: HashMap<&str, &Instrument> = instruments
        .iter()
        .map(|instrument| (instrument.code.as_str(), instrument))
        .collect();

    let mut diversified = CategoryTotals::default();
    let mut individual = CategoryTotals::default();

    for (code, calc) in stock_stats(transactions, config) {
        let instrument = instrument_map.get(code.as_str()).copied();
        let currency = instrument.map(|i| i.currency.as_str()).unwrap_or("KRW");

        let current_price = match instrument {
            Some(instrument) if calc.quantity > Decimal::ZERO => {
                resolve_price(price_source, instrument)
            }
            _ => Decimal::ZERO,
        };

        let evaluated = display.to_krw(current_price * calc.quantity, currency);
        let operating = display.to_krw(calc.invested_amount, currency);
        let realized = display.to_krw(calc.realized_profit, currency);

        let totals = if portfolio_codes.contains(&code) {
            &mut diversified
        } else {
            &mut individual
        };
        totals.operating += operating;
        totals.evaluated += evaluated;
        totals.realized += realized;
    }

    let stock_operating = diversified.operating + individual.operating;
    let stock_evaluated = diversified.evaluated + individual.evaluated;
    let stock_realized = diversified.realized + individual.realized;
    let deposit_principal = total_principal - stock_operating;

    let category_row = |title: &str, totals: &CategoryTotals| OverallStats {
        title: title.to_string(),
        principal: totals.operating,
        operating_amount: totals.operating,
        evaluated_amount: totals.evaluated,
        evaluated_profit: totals.evaluated - totals.operating,
        realized_profit: totals.realized,
        evaluated_assets: totals.evaluated,
        deposit: Decimal::ZERO,
    };

    let total_row = OverallStats {
        title: TITLE_TOTAL.to_string(),
        principal: total_principal,
        operating_amount: stock_operating,
        evaluated_amount: stock_evaluated,
        evaluated_profit: stock_evaluated - stock_operating,
        realized_profit: stock_realized + deposit_interest_profit,
        deposit: total_deposit,
        evaluated_assets: stock_evaluated + total_deposit,
    };

    let stock_row = OverallStats {
        title: TITLE_STOCK.to_string(),
        principal: stock_operating,
        operating_amount: stock_operating,
        evaluated_amount: stock_evaluated,
        evaluated_profit: stock_evaluated - stock_operating,
        realized_profit: stock_realized,
        evaluated_assets: stock_evaluated,
        deposit: Decimal::ZERO,
    };

    let deposit_row = OverallStats {
        title: TITLE_DEPOSIT.to_string(),
        principal: deposit_principal,
        realized_profit: deposit_interest_profit,
        // 예금 평가자산 = 남은 원금 + 이자수익
        evaluated_assets: deposit_principal + deposit_interest_profit,
        deposit: total_deposit,
        ..OverallStats::titled(TITLE_DEPOSIT)
    };

    vec![
        total_row,
        stock_row,
        category_row(TITLE_DIVERSIFIED, &diversified),
        category_row(TITLE_INDIVIDUAL, &individual),
        deposit_row,
    ]
}
