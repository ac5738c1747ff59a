//! 정제 거래내역 빌드.
//!
//! 임포트 1회분의 원장 행 전체를 한 번에 변환합니다. 행마다 거래종류
//! 분류, 종목명 해석, 일자 보정, 유효 환율 주석, 매매일지 손익 대조를
//! 수행하며, 결과는 이전 정제 결과 전체를 교체합니다.

use ledger_core::{
    code_map, name_pool, CorrectedTransaction, DecimalExt, EngineConfig, OverseasTradeLogEntry,
    RawImport, RawTransaction, TradeLogEntry, TransactionKind,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::classify::{
    classify, is_stock_settlement, normalize_label, DISTRIBUTION_LABEL, FX_BUY_FOREIGN_IN_LABEL,
    FX_BUY_KRW_OUT_LABEL, FX_SELL_FOREIGN_OUT_LABEL, FX_SELL_KRW_IN_LABEL,
};
use crate::date_corrector::correct_date;
use crate::fx::effective_rate;
use crate::name_resolver::resolve;

/// 보정에 필요한 대조 자료 묶음.
struct CorrectionContext<'a> {
    trade_logs: &'a [TradeLogEntry],
    overseas_logs: &'a [OverseasTradeLogEntry],
    name_pool: Vec<String>,
    code_map: HashMap<String, String>,
}

impl<'a> CorrectionContext<'a> {
    fn from_import(input: &'a RawImport) -> Self {
        Self {
            trade_logs: &input.trade_logs,
            overseas_logs: &input.overseas_trade_logs,
            name_pool: name_pool(&input.instruments),
            code_map: code_map(&input.instruments),
        }
    }
}

/// 원본 임포트에서 정제 거래내역을 빌드합니다.
///
/// 분류 불가능한 거래종류의 행은 제외됩니다. 빈 임포트는 빈 결과를
/// 반환합니다 (no-op, 에러 아님). 출력은 `(매매일자, 거래번호)` 오름차순
/// 으로 정렬되어 원가 재생에 바로 쓸 수 있습니다.
pub fn build_transactions(input: &RawImport, config: &EngineConfig) -> Vec<CorrectedTransaction> {
    if input.transactions.is_empty() {
        return Vec::new();
    }

    let _span = ledger_core::reconcile_span!("build_transactions").entered();

    let context = CorrectionContext::from_import(input);

    let mut sorted: Vec<RawTransaction> = input.transactions.clone();
    sorted.sort_by(|a, b| {
        (&a.account, a.settlement_date, &a.sequence_no)
            .cmp(&(&b.account, b.settlement_date, &b.sequence_no))
    });

    let mut transactions: Vec<CorrectedTransaction> = sorted
        .iter()
        .filter_map(|row| {
            classify(&row.kind_label).map(|kind| correct_row(row, kind, &sorted, &context, config))
        })
        .collect();

    transactions.sort_by(|a, b| {
        (a.trade_date, &a.order_no).cmp(&(b.trade_date, &b.order_no))
    });

    tracing::info!(
        raw_rows = input.transactions.len(),
        corrected_rows = transactions.len(),
        "정제 거래내역 빌드 완료"
    );

    transactions
}

/// 원장 행 하나를 정제 행으로 변환합니다.
fn correct_row(
    row: &RawTransaction,
    kind: TransactionKind,
    all_rows: &[RawTransaction],
    context: &CorrectionContext<'_>,
    config: &EngineConfig,
) -> CorrectedTransaction {
    // 같은 계좌/결제일의 관련 leg들
    let related: Vec<&RawTransaction> = all_rows
        .iter()
        .filter(|r| r.account == row.account && r.settlement_date == row.settlement_date)
        .collect();

    let label = normalize_label(&row.kind_label);

    // 종목명 보정: 실물 입출고와 분배금은 퍼지 해석, 환전 leg는 상대 leg의
    // 통화명에 매수/매도 접미사
    let name = if is_stock_settlement(&row.kind_label) || row.kind_label == DISTRIBUTION_LABEL {
        resolve(&row.name, &context.name_pool, config.match_threshold)
            .unwrap_or_else(|| row.name.clone())
    } else if label == FX_BUY_KRW_OUT_LABEL {
        let partner = related
            .iter()
            .find(|r| r.kind_label == FX_BUY_FOREIGN_IN_LABEL)
            .map(|r| r.name.as_str())
            .unwrap_or(&row.name);
        format!("{}매수", partner)
    } else if label == FX_SELL_KRW_IN_LABEL {
        let partner = related
            .iter()
            .find(|r| r.kind_label == FX_SELL_FOREIGN_OUT_LABEL)
            .map(|r| r.name.as_str())
            .unwrap_or(&row.name);
        format!("{}매도", partner)
    } else {
        row.name.clone()
    };

    // 일자 보정: 실물 입출고만 결제일이 체결일보다 늦으므로 매매일지에서 찾는다
    let trade_date = if is_stock_settlement(&row.kind_label) {
        correct_date(
            context.trade_logs,
            context.overseas_logs,
            &row.account,
            &name,
            row.settlement_date,
        )
        .unwrap_or(row.settlement_date)
    } else {
        row.settlement_date
    };

    // 결제금액: 해외 거래/환전 leg는 외화거래금액, 외화 이자/배당은 외화입출금액
    let amount = match row.kind_label.as_str() {
        "해외주식매수입고" | "해외주식매도출고" => row.foreign_amount,
        l if l == FX_BUY_FOREIGN_IN_LABEL || l == FX_SELL_FOREIGN_OUT_LABEL => row.foreign_amount,
        "외화예탁금이용료입금" | "배당금외화입금" => row.foreign_dw_amount,
        _ => row.amount,
    };

    // 단가: 환전의 원화 지출/외화 인도 leg에는 역산한 유효 환율을 싣고,
    // 수취 leg에는 0을 싣는다 (중복 집계 방지)
    let price = if label == FX_BUY_KRW_OUT_LABEL || label == FX_SELL_FOREIGN_OUT_LABEL {
        let local_amount = related
            .iter()
            .find(|r| r.kind_label == FX_SELL_KRW_IN_LABEL)
            .map(|r| r.amount)
            .unwrap_or(row.amount);
        effective_rate(all_rows, &row.account, row.settlement_date, local_amount)
            .round_half_up(config.fx_rate_scale)
    } else if label == FX_BUY_FOREIGN_IN_LABEL || label == FX_SELL_KRW_IN_LABEL {
        Decimal::ZERO
    } else {
        row.price
    };

    // 수량: 환전 매도의 원화 입금 leg는 인도한 외화 금액을 수량으로 기록
    let quantity = if label == FX_SELL_KRW_IN_LABEL {
        related
            .iter()
            .find(|r| r.kind_label == FX_SELL_FOREIGN_OUT_LABEL)
            .map(|r| r.foreign_amount)
            .unwrap_or(row.quantity)
    } else {
        row.quantity
    };

    // 매매일지 대조: 실물 입출고만 증권사 계산 손익/수익률을 복사
    let (profit_loss, yield_rate) = if is_stock_settlement(&row.kind_label) {
        let is_krw = row.currency_code.is_empty() || row.currency_code == "KRW";
        if is_krw {
            context
                .trade_logs
                .iter()
                .find(|log| {
                    log.account == row.account && log.name == name && log.trade_date == trade_date
                })
                .map(|log| (log.profit_loss, log.yield_rate))
                .unwrap_or((Decimal::ZERO, Decimal::ZERO))
        } else {
            context
                .overseas_logs
                .iter()
                .find(|log| {
                    log.account == row.account && log.name == name && log.trade_date == trade_date
                })
                .map(|log| (log.trading_profit, log.yield_rate))
                .unwrap_or((Decimal::ZERO, Decimal::ZERO))
        }
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let code = context.code_map.get(&name).cloned().unwrap_or_default();

    let currency_code = if row.currency_code.is_empty() {
        "KRW".to_string()
    } else {
        row.currency_code.clone()
    };

    CorrectedTransaction {
        account: row.account.clone(),
        trade_date,
        kind,
        kind_detail: label.to_string(),
        code,
        name,
        price,
        quantity,
        fee: row.fee,
        tax: row.tax,
        amount,
        profit_loss,
        yield_rate,
        currency_code,
        order_no: row.sequence_no.clone(),
    }
}
