//! 설정 관리.
//!
//! 이 모듈은 정산 엔진의 설정을 정의하고 관리합니다.

use crate::error::LedgerResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 정산 엔진 설정
    #[serde(default)]
    pub engine: EngineConfig,
    /// 표시용 환율 설정
    #[serde(default)]
    pub display: DisplayConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 정산 엔진 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// 종목명 퍼지 매칭 임계값 (이하이면 미해결 처리)
    pub match_threshold: Decimal,
    /// 수량/원가 잔존 오차 허용치 (이하이면 0으로 스냅)
    pub quantity_epsilon: Decimal,
    /// 유효 환율 표시 소수점 자릿수
    pub fx_rate_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_threshold: dec!(0.3),
            quantity_epsilon: dec!(0.000001),
            fx_rate_scale: 2,
        }
    }
}

/// 표시용 환율 설정.
///
/// 집계 시점에 외화 금액을 원화 합계에 접는 데 사용하는 최신 환율입니다.
/// 거래별 원가 보정에 쓰이는 유효 환율과는 별개의 표시 전용 환산입니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// 통화코드 → 원화 환율 (예: "USD" → 1350.0)
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
}

impl DisplayConfig {
    /// 환율 하나를 추가합니다.
    pub fn with_rate(mut self, currency: impl Into<String>, rate: Decimal) -> Self {
        self.rates.insert(currency.into().to_uppercase(), rate);
        self
    }

    /// 금액을 원화로 환산합니다.
    ///
    /// 원화이거나 환율이 등록되지 않은 통화는 금액을 그대로 반환합니다
    /// (환율 미상 시에도 합계 산출을 막지 않습니다).
    pub fn to_krw(&self, amount: Decimal, currency: &str) -> Decimal {
        if currency.is_empty() || currency.eq_ignore_ascii_case("KRW") {
            return amount;
        }
        match self.rates.get(&currency.to_uppercase()) {
            Some(rate) => amount * *rate,
            None => amount,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("LEDGER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> LedgerResult<Self> {
        Self::load("config/default.toml")
    }
}
