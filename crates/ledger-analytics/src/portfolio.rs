//! 포트폴리오 리밸런싱 계산.
//!
//! 목표 비중 테이블과 정제 거래내역, 현재가를 합쳐 조정 필요 금액을
//! 계산합니다. 결과는 평가 시점마다 재계산하며 영속화하지 않습니다.

use crate::cost_basis::stock_stats;
use crate::price::{resolve_price, PriceSource};
use ledger_core::{
    CorrectedTransaction, EngineConfig, Instrument, PortfolioItem, PortfolioSummary,
    PortfolioTarget,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// 리밸런싱 기준금액을 계산합니다 (이체입금 합계).
pub fn base_amount(transactions: &[CorrectedTransaction]) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.is_wire_in())
        .map(|tx| tx.amount)
        .sum()
}

/// 목표 비중 테이블 기준 리밸런싱 뷰를 만듭니다.
///
/// 종목별로 목표금액 = 기준금액 × 비중/100, 조정금액 = 목표 − 평가,
/// 조정률 = 조정/평가 × 100 (평가 0이면 0)을 계산하고, 전체 평가합이
/// 나온 뒤에 현재 비중을 채웁니다.
pub fn portfolio_view(
    targets: &[PortfolioTarget],
    transactions: &[CorrectedTransaction],
    instruments: &[Instrument],
    price_source: &dyn PriceSource,
    config: &EngineConfig,
) -> PortfolioSummary {
    let base = base_amount(transactions);
    let stats = stock_stats(transactions, config);
    let instrument_map: HashMap<&str, &Instrument> = instruments
        .iter()
        .map(|instrument| (instrument.code.as_str(), instrument))
        .collect();

    let mut items: Vec<PortfolioItem> = targets
        .iter()
        .map(|target| {
            let instrument = instrument_map.get(target.code.as_str()).copied();
            let stat = stats.get(&target.code);

            let quantity = stat.map(|s| s.quantity).unwrap_or_default();
            let invested_amount = stat.map(|s| s.invested_amount).unwrap_or_default();
            let current_price = instrument
                .map(|i| resolve_price(price_source, i))
                .unwrap_or_default();

            let evaluation_amount = current_price * quantity;
            let target_amount = base * target.target_weight / dec!(100);
            let adjustment_amount = target_amount - evaluation_amount;
            let adjustment_rate = if evaluation_amount.is_zero() {
                Decimal::ZERO
            } else {
                adjustment_amount / evaluation_amount * dec!(100)
            };

            PortfolioItem {
                code: target.code.clone(),
                name: instrument
                    .map(|i| i.display_name().to_string())
                    .unwrap_or_else(|| target.code.clone()),
                target_weight: target.target_weight,
                target_amount,
                evaluation_amount,
                current_weight: Decimal::ZERO,
                invested_amount,
                adjustment_amount,
                adjustment_rate,
                current_price,
                quantity,
                currency: instrument
                    .map(|i| i.currency.clone())
                    .unwrap_or_else(|| "KRW".to_string()),
            }
        })
        .collect();

    let total_evaluation_amount: Decimal = items.iter().map(|i| i.evaluation_amount).sum();
    let total_invested_amount: Decimal = items.iter().map(|i| i.invested_amount).sum();
    let total_target_weight: Decimal = items.iter().map(|i| i.target_weight).sum();

    // 현재 비중은 전체 평가합이 나와야 계산할 수 있다
    if !total_evaluation_amount.is_zero() {
        for item in &mut items {
            item.current_weight = item.evaluation_amount / total_evaluation_amount * dec!(100);
        }
    }

    PortfolioSummary {
        items,
        total_base_amount: base,
        total_evaluation_amount,
        total_invested_amount,
        total_target_weight,
    }
}
