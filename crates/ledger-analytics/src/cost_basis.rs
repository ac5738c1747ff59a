//! 이동평균법 원가 재생.
//!
//! 정제 거래내역을 (계좌, 종목) 그룹별로 `(매매일자, 거래번호)` 오름차순
//! 재생하여 실현손익과 보유 현황을 계산합니다. 이동평균법은 재생 순서에
//! 따라 평균단가가 달라지므로 (교환법칙이 성립하지 않음) 이 정렬이
//! 엔진 전체에서 가장 중요한 정합성 조건입니다.

use ledger_core::{
    AccountStockStatus, CorrectedTransaction, DecimalExt, EngineConfig, Percentage, Price,
    Quantity, TransactionKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// 재생 중의 포지션 상태 (재생 내부 전용, 영속화하지 않음).
#[derive(Debug, Clone, Default)]
pub struct PositionState {
    /// 보유수량
    pub quantity: Quantity,
    /// 보유분 총원가
    pub total_cost: Decimal,
    /// 누적 실현손익
    pub realized_pnl: Decimal,
    /// 수익률 × 매도원가 누적 (가중 수익률 분자)
    weighted_yield_sum: Decimal,
    /// 매도원가 누적 (가중 수익률 분모)
    total_sale_cost: Decimal,
}

impl PositionState {
    /// 빈 포지션을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 평균단가를 반환합니다 (보유분 없으면 0).
    pub fn average_price(&self) -> Price {
        if self.quantity > Decimal::ZERO {
            self.total_cost / self.quantity
        } else {
            Decimal::ZERO
        }
    }

    /// 매도원가 가중 평균 수익률을 반환합니다.
    ///
    /// 개별 매도의 수익률을 매도원가로 가중 평균하므로 큰 매도가
    /// 보고 수익률을 적절히 지배합니다 (단순 평균 아님).
    pub fn weighted_yield(&self) -> Percentage {
        if self.total_sale_cost > Decimal::ZERO {
            self.weighted_yield_sum / self.total_sale_cost
        } else {
            Decimal::ZERO
        }
    }

    /// 거래 하나를 상태에 적용합니다.
    pub fn apply(&mut self, tx: &CorrectedTransaction, epsilon: Decimal) {
        match tx.kind {
            TransactionKind::Buy => {
                // 증권사 화면과 매수 금액을 동일하게 맞추기 위해
                // 수수료/세금을 차감하지 않은 거래금액을 원가에 더한다
                self.quantity += tx.quantity;
                self.total_cost += tx.amount;
            }
            TransactionKind::Sell => {
                self.apply_sell(tx, epsilon);
            }
            TransactionKind::Interest if tx.is_dividend() => {
                // 배당은 수량/원가에 손대지 않고 실현손익에만 반영
                self.realized_pnl += tx.net_amount();
            }
            _ => {}
        }
    }

    fn apply_sell(&mut self, tx: &CorrectedTransaction, epsilon: Decimal) {
        let sold_cost = if self.quantity > Decimal::ZERO {
            let average = self.total_cost / self.quantity;
            tx.quantity * average
        } else {
            Decimal::ZERO
        };

        let net_amount = tx.net_amount();
        let realized = net_amount - sold_cost;

        self.total_cost -= sold_cost;
        self.quantity -= tx.quantity;
        self.realized_pnl += realized;

        // 가중 수익률: 매매일지 수익률이 있으면 그대로, 없으면 재생
        // 결과에서 유도한다
        if !tx.profit_loss.is_zero() || !tx.yield_rate.is_zero() {
            let sale_cost = tx.amount - tx.profit_loss;
            self.weighted_yield_sum += tx.yield_rate * sale_cost;
            self.total_sale_cost += sale_cost;
        } else if sold_cost > Decimal::ZERO {
            let yield_rate = realized / sold_cost * dec!(100);
            self.weighted_yield_sum += yield_rate * sold_cost;
            self.total_sale_cost += sold_cost;
        }

        // 반복 매도 후 남는 부동 잔량은 0으로 스냅하여 유령 포지션을
        // 막는다. epsilon을 넘는 음수 수량은 데이터 이상 신호이므로
        // 고치지 않고 그대로 보고한다.
        if self.quantity.is_negligible(epsilon) {
            self.quantity = Decimal::ZERO;
            self.total_cost = Decimal::ZERO;
        }
    }
}

/// (계좌, 종목) 단위로 재생하여 종목 현황을 만듭니다.
///
/// 입력은 이미 `(매매일자, 거래번호)` 순으로 정렬되어 있어야 하며
/// (빌더가 보장), 그룹 간 순서는 (계좌, 종목코드) 사전순으로 결정적
/// 입니다. 보유도 실현손익도 없는 그룹은 결과에서 제외합니다.
pub fn replay_positions(
    transactions: &[CorrectedTransaction],
    config: &EngineConfig,
) -> Vec<AccountStockStatus> {
    let mut groups: BTreeMap<(&str, &str), Vec<&CorrectedTransaction>> = BTreeMap::new();
    for tx in transactions {
        if tx.code.is_empty() {
            continue;
        }
        groups
            .entry((tx.account.as_str(), tx.code.as_str()))
            .or_default()
            .push(tx);
    }

    let mut statuses = Vec::new();

    for ((account, code), group) in groups {
        let currency_code = group
            .first()
            .map(|tx| tx.currency_code.clone())
            .unwrap_or_else(|| "KRW".to_string());

        let mut state = PositionState::new();
        for tx in &group {
            state.apply(tx, config.quantity_epsilon);
        }

        if state.quantity < Decimal::ZERO {
            tracing::warn!(
                account,
                code,
                quantity = %state.quantity,
                "매도 초과로 음수 수량 발생 (원본 데이터 이상 의심)"
            );
        }

        if state.quantity.is_zero() && state.realized_pnl.is_zero() {
            continue;
        }

        statuses.push(AccountStockStatus {
            account: account.to_string(),
            code: code.to_string(),
            quantity: state.quantity,
            average_price: state.average_price(),
            investment_amount: state.total_cost,
            realized_pnl: state.realized_pnl,
            realized_pnl_rate: state.weighted_yield(),
            currency_code,
        });
    }

    statuses
}

/// 종목 단위 간이 통계 (전체 현황/포트폴리오 계산용).
#[derive(Debug, Clone, Default)]
pub struct StockStats {
    /// 보유수량
    pub quantity: Quantity,
    /// 잔여 투자원금 (수수료/세금 포함 매수원가 기준)
    pub invested_amount: Decimal,
    /// 실현손익 (매도손익 + 배당)
    pub realized_profit: Decimal,
}

/// 계좌 구분 없이 종목코드 단위로 재생한 간이 통계를 만듭니다.
///
/// 매수원가에 수수료/세금을 포함하고 매도는 순금액 기준으로 계산하는
/// 전체 현황용 변형입니다. 빈 종목코드는 건너뜁니다.
pub fn stock_stats(
    transactions: &[CorrectedTransaction],
    config: &EngineConfig,
) -> BTreeMap<String, StockStats> {
    let mut groups: BTreeMap<&str, Vec<&CorrectedTransaction>> = BTreeMap::new();
    for tx in transactions {
        if tx.code.is_empty() {
            continue;
        }
        groups.entry(tx.code.as_str()).or_default().push(tx);
    }

    let mut stats: BTreeMap<String, StockStats> = BTreeMap::new();

    for (code, group) in groups {
        let mut calc = StockStats::default();

        for tx in group {
            match tx.kind {
                TransactionKind::Buy => {
                    calc.quantity += tx.quantity;
                    calc.invested_amount += tx.amount + tx.fee + tx.tax;
                }
                TransactionKind::Sell => {
                    let average = if calc.quantity > Decimal::ZERO {
                        calc.invested_amount / calc.quantity
                    } else {
                        Decimal::ZERO
                    };
                    let sold_cost = average * tx.quantity;
                    calc.realized_profit += tx.net_amount() - sold_cost;
                    calc.invested_amount -= sold_cost;
                    calc.quantity -= tx.quantity;

                    if calc.quantity.is_negligible(config.quantity_epsilon) {
                        calc.quantity = Decimal::ZERO;
                        calc.invested_amount = Decimal::ZERO;
                    }
                }
                TransactionKind::Interest if tx.is_dividend() => {
                    calc.realized_profit += tx.net_amount();
                }
                _ => {}
            }
        }

        stats.insert(code.to_string(), calc);
    }

    stats
}
