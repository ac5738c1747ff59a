//! 정산 파이프라인 진입점.
//!
//! 원본 피드 → 정제 거래내역 → 종목/계좌 현황까지를 한 번에 수행하는
//! 순수 함수형 엔진입니다. 전역 상태 없이 주입된 설정만 사용하므로
//! 같은 입력에 대해 항상 같은 출력을 돌려줍니다.

use crate::aggregator::account_statuses;
use crate::cost_basis::replay_positions;
use crate::overall::overall_stats;
use crate::portfolio::portfolio_view;
use crate::price::PriceSource;
use ledger_core::{
    AccountStatus, AccountStockStatus, AppConfig, CorrectedTransaction, DisplayConfig,
    EngineConfig, OverallStats, PortfolioSummary, PortfolioTarget, RawImport,
};
use ledger_reconcile::build_transactions;
use std::collections::BTreeSet;

/// 정산 1회의 결과 묶음.
///
/// 매 정산마다 전체가 새로 계산되며, 기존 현황을 통째로 교체하는
/// 용도로 설계되었습니다.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutput {
    /// 정제 거래내역 (매매일자, 거래번호 순)
    pub transactions: Vec<CorrectedTransaction>,
    /// 계좌+종목 단위 현황
    pub stock_statuses: Vec<AccountStockStatus>,
    /// 계좌 단위 현황 ("전체" 행 포함)
    pub account_statuses: Vec<AccountStatus>,
}

/// 정산 엔진.
pub struct Reconciler {
    config: EngineConfig,
    display: DisplayConfig,
}

impl Reconciler {
    /// 엔진 설정으로 생성합니다.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            display: DisplayConfig::default(),
        }
    }

    /// 표시용 환율을 지정합니다.
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// 애플리케이션 설정에서 엔진을 만듭니다.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            config: config.engine.clone(),
            display: config.display.clone(),
        }
    }

    /// 원본 피드를 정산합니다.
    ///
    /// 빈 입력이면 빈 출력입니다. 부분 실패로 배치를 중단하는 경로는
    /// 없으며, 해결하지 못한 항목은 원본 값 그대로 결과에 남습니다.
    pub fn reconcile(&self, input: &RawImport) -> ReconcileOutput {
        if input.is_empty() {
            return ReconcileOutput::default();
        }

        let transactions = build_transactions(input, &self.config);
        let stock_statuses = replay_positions(&transactions, &self.config);
        let account_statuses = account_statuses(&transactions, &stock_statuses);

        tracing::info!(
            transactions = transactions.len(),
            stocks = stock_statuses.len(),
            accounts = account_statuses.len().saturating_sub(1),
            "정산 완료"
        );

        ReconcileOutput {
            transactions,
            stock_statuses,
            account_statuses,
        }
    }

    /// 전체 투자 현황 롤업을 계산합니다 (평가 시점마다 재계산).
    pub fn overall_stats(
        &self,
        output: &ReconcileOutput,
        targets: &[PortfolioTarget],
        input: &RawImport,
        price_source: &dyn PriceSource,
    ) -> Vec<OverallStats> {
        let portfolio_codes: BTreeSet<String> =
            targets.iter().map(|t| t.code.clone()).collect();
        overall_stats(
            &output.transactions,
            &portfolio_codes,
            &input.instruments,
            price_source,
            &self.config,
            &self.display,
        )
    }

    /// 포트폴리오 리밸런싱 뷰를 계산합니다 (평가 시점마다 재계산).
    pub fn portfolio_view(
        &self,
        output: &ReconcileOutput,
        targets: &[PortfolioTarget],
        input: &RawImport,
        price_source: &dyn PriceSource,
    ) -> PortfolioSummary {
        portfolio_view(
            targets,
            &output.transactions,
            &input.instruments,
            price_source,
            &self.config,
        )
    }
}
