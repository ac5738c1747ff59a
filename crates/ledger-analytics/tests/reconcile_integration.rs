//! 정산 파이프라인 종단 테스트.
//!
//! 원본 피드 임포트부터 종목/계좌 현황, 전체 롤업, 포트폴리오 뷰까지
//! 실제 사용 시나리오 그대로 검증합니다.

use chrono::NaiveDate;
use ledger_analytics::{Reconciler, StaticPriceSource};
use ledger_core::{
    DisplayConfig, EngineConfig, Instrument, PortfolioTarget, RawImport, RawTransaction,
    TradeLogEntry, TransactionKind, ALL_ACCOUNTS,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn reconciler() -> Reconciler {
    Reconciler::new(EngineConfig::default())
}

#[test]
fn test_full_position_close_realizes_profit() {
    // 매수 10주 10,000원, 전량 매도 순 12,000원 → 실현손익 2,000원
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_price(dec!(1000))
                .with_amount(dec!(10000)),
            RawTransaction::new("1111", date("2024-01-12"), "1", "주식매도출고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(12000)),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    assert_eq!(output.stock_statuses.len(), 1);

    let status = &output.stock_statuses[0];
    assert_eq!(status.realized_pnl, dec!(2000));
    assert_eq!(status.quantity, Decimal::ZERO);
    assert_eq!(status.investment_amount, Decimal::ZERO);
}

#[test]
fn test_partial_sell_against_moving_average() {
    // 4주 매도 순 4,800원, 평균단가 1,000원 → 실현 800원, 잔량 6주 원가 6,000원
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_price(dec!(1000))
                .with_amount(dec!(10000)),
            RawTransaction::new("1111", date("2024-01-12"), "1", "주식매도출고", "삼성전자")
                .with_quantity(dec!(4))
                .with_amount(dec!(4800)),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    let status = &output.stock_statuses[0];
    assert_eq!(status.realized_pnl, dec!(800));
    assert_eq!(status.quantity, dec!(6));
    assert_eq!(status.investment_amount, dec!(6000));
    assert_eq!(status.average_price, dec!(1000));
}

#[test]
fn test_fx_conversion_effective_rate() {
    // (1,450,000 + 5,000) / 1,000 USD = 1,455.00
    let d = date("2024-02-05");
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", d, "1", "외화매수원화출금", "미국달러")
                .with_amount(dec!(1450000)),
            RawTransaction::new("1111", d, "2", "외화매수외화입금", "미국달러")
                .with_foreign_amount(dec!(1000))
                .with_currency("USD"),
            RawTransaction::new("1111", d, "3", "선환전차액출금", "미국달러")
                .with_amount(dec!(5000)),
        ],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    let krw_out = output
        .transactions
        .iter()
        .find(|t| t.kind_detail == "외화매수원화출금")
        .unwrap();
    assert_eq!(krw_out.price, dec!(1455.00));
    assert_eq!(krw_out.name, "미국달러매수");
}

#[test]
fn test_unmatched_name_passes_through() {
    let input = RawImport {
        transactions: vec![RawTransaction::new(
            "1111",
            date("2024-01-04"),
            "1",
            "주식매수입고",
            "XYZ 임시명",
        )
        .with_quantity(dec!(1))
        .with_amount(dec!(1000))],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    let tx = &output.transactions[0];
    assert_eq!(tx.name, "XYZ 임시명");
    assert!(tx.code.is_empty());
    // 종목코드가 없으면 종목 현황에서 제외된다
    assert!(output.stock_statuses.is_empty());
}

#[test]
fn test_residual_quantity_snap() {
    // 10.0000003주 매수 후 10주 매도 → 잔량 0.0000003은 0으로 스냅
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10.0000003))
                .with_amount(dec!(10000)),
            RawTransaction::new("1111", date("2024-01-12"), "1", "주식매도출고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(11000)),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    let status = &output.stock_statuses[0];
    assert_eq!(status.quantity, Decimal::ZERO);
    assert_eq!(status.investment_amount, Decimal::ZERO);
    assert_eq!(status.average_price, Decimal::ZERO);
}

#[test]
fn test_trade_date_correction_reorders_replay() {
    // 매도의 결제일이 매수보다 빠르지만 매매일지가 실제 체결일을 알려준다
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-10"), "1", "주식매도출고", "삼성전자")
                .with_quantity(dec!(5))
                .with_amount(dec!(6000)),
            RawTransaction::new("1111", date("2024-01-09"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(10000)),
        ],
        trade_logs: vec![
            TradeLogEntry::new("1111", date("2024-01-05"), "삼성전자"),
            TradeLogEntry::new("1111", date("2024-01-08"), "삼성전자"),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    // 두 행 모두 결제일 이전 매매일지 일자 중 최댓값으로 보정된다
    for tx in &output.transactions {
        assert_eq!(tx.trade_date, date("2024-01-08"));
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-02"), "1", "이체입금", "")
                .with_amount(dec!(1000000)),
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(700000)),
            RawTransaction::new("2222", date("2024-01-05"), "1", "해외주식매수입고", "애플")
                .with_quantity(dec!(3))
                .with_foreign_amount(dec!(540))
                .with_currency("USD"),
            RawTransaction::new("1111", date("2024-01-20"), "1", "주식매도출고", "삼성전자")
                .with_quantity(dec!(4))
                .with_amount(dec!(300000)),
            RawTransaction::new("1111", date("2024-02-01"), "1", "배당금입금", "삼성전자")
                .with_amount(dec!(3500)),
        ],
        instruments: vec![
            Instrument::new("005930", "삼성전자"),
            Instrument::new("AAPL", "애플").with_currency("USD"),
        ],
        ..Default::default()
    };

    let engine = reconciler();
    let first = engine.reconcile(&input);
    let second = engine.reconcile(&input);

    // 동일 입력 재정산은 바이트 단위로 같은 결과를 내야 한다
    let first_json = (
        serde_json::to_string(&first.transactions).unwrap(),
        serde_json::to_string(&first.stock_statuses).unwrap(),
        serde_json::to_string(&first.account_statuses).unwrap(),
    );
    let second_json = (
        serde_json::to_string(&second.transactions).unwrap(),
        serde_json::to_string(&second.stock_statuses).unwrap(),
        serde_json::to_string(&second.account_statuses).unwrap(),
    );
    assert_eq!(first_json, second_json);
}

#[test]
fn test_account_rollup_with_total_row() {
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-02"), "1", "이체입금", "")
                .with_amount(dec!(1000000)),
            RawTransaction::new("2222", date("2024-01-02"), "1", "이체입금", "")
                .with_amount(dec!(500000)),
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(700000)),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    assert_eq!(output.account_statuses.len(), 3);

    let total = output.account_statuses.last().unwrap();
    assert_eq!(total.account, ALL_ACCOUNTS);
    assert_eq!(total.krw_deposit, dec!(800000));
    assert_eq!(total.operating_funds, dec!(700000));
}

#[test]
fn test_overall_and_portfolio_views() {
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-02"), "1", "이체입금", "")
                .with_amount(dec!(1000000)),
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(500000)),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let engine = Reconciler::new(EngineConfig::default())
        .with_display(DisplayConfig::default().with_rate("USD", dec!(1300)));
    let output = engine.reconcile(&input);

    let targets = vec![PortfolioTarget::new("005930", dec!(60))];
    let prices = StaticPriceSource::new().with_price("005930", dec!(55000));

    let stats = engine.overall_stats(&output, &targets, &input, &prices);
    assert_eq!(stats.len(), 5);
    assert_eq!(stats[0].title, "총투자내역");
    assert_eq!(stats[0].principal, dec!(1000000));
    assert_eq!(stats[0].operating_amount, dec!(500000));
    assert_eq!(stats[0].evaluated_amount, dec!(550000));
    // 분산투자내역에 포트폴리오 종목이 들어간다
    assert_eq!(stats[2].operating_amount, dec!(500000));

    let summary = engine.portfolio_view(&output, &targets, &input, &prices);
    assert_eq!(summary.total_base_amount, dec!(1000000));
    assert_eq!(summary.items[0].target_amount, dec!(600000));
    assert_eq!(summary.items[0].adjustment_amount, dec!(50000));
}

#[test]
fn test_dividend_flows_into_realized_pnl() {
    let input = RawImport {
        transactions: vec![
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(700000)),
            RawTransaction::new("1111", date("2024-04-19"), "1", "배당금입금", "삼성전자")
                .with_amount(dec!(3610))
                .with_tax(dec!(550)),
        ],
        instruments: vec![Instrument::new("005930", "삼성전자")],
        ..Default::default()
    };

    let output = reconciler().reconcile(&input);
    let dividend = output
        .transactions
        .iter()
        .find(|t| t.kind == TransactionKind::Interest)
        .unwrap();
    assert!(dividend.is_dividend());
    assert_eq!(dividend.code, "005930");

    // 배당은 수량/원가를 건드리지 않고 세후 금액만 실현손익에 더한다
    let status = &output.stock_statuses[0];
    assert_eq!(status.quantity, dec!(10));
    assert_eq!(status.investment_amount, dec!(700000));
    assert_eq!(status.realized_pnl, dec!(3060));
}

proptest! {
    // 임의 순서의 동일 행 집합은 항상 같은 현황을 만든다 (입력 순서 불변성)
    #[test]
    fn prop_input_order_does_not_change_output(seed in 0usize..24) {
        let mut rows = vec![
            RawTransaction::new("1111", date("2024-01-02"), "1", "이체입금", "")
                .with_amount(dec!(1000000)),
            RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(10))
                .with_amount(dec!(10000)),
            RawTransaction::new("1111", date("2024-01-12"), "1", "주식매도출고", "삼성전자")
                .with_quantity(dec!(4))
                .with_amount(dec!(4800)),
            RawTransaction::new("1111", date("2024-01-15"), "1", "주식매수입고", "삼성전자")
                .with_quantity(dec!(5))
                .with_amount(dec!(7500)),
        ];
        let len = rows.len();
        rows.rotate_left(seed % len);

        let instruments = vec![Instrument::new("005930", "삼성전자")];
        let baseline = Reconciler::new(EngineConfig::default()).reconcile(&RawImport {
            transactions: vec![
                RawTransaction::new("1111", date("2024-01-02"), "1", "이체입금", "")
                    .with_amount(dec!(1000000)),
                RawTransaction::new("1111", date("2024-01-04"), "1", "주식매수입고", "삼성전자")
                    .with_quantity(dec!(10))
                    .with_amount(dec!(10000)),
                RawTransaction::new("1111", date("2024-01-12"), "1", "주식매도출고", "삼성전자")
                    .with_quantity(dec!(4))
                    .with_amount(dec!(4800)),
                RawTransaction::new("1111", date("2024-01-15"), "1", "주식매수입고", "삼성전자")
                    .with_quantity(dec!(5))
                    .with_amount(dec!(7500)),
            ],
            instruments: instruments.clone(),
            ..Default::default()
        });

        let shuffled = Reconciler::new(EngineConfig::default()).reconcile(&RawImport {
            transactions: rows,
            instruments,
            ..Default::default()
        });

        prop_assert_eq!(baseline.stock_statuses, shuffled.stock_statuses);
        prop_assert_eq!(baseline.account_statuses, shuffled.account_statuses);
    }
}
