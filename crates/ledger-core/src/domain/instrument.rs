//! 종목 마스터.

use crate::types::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 종목 마스터 항목.
///
/// 매매일지의 정식 종목명이 이름 풀을 이루고, 이름 → 코드 매핑의
/// 기준이 됩니다. `last_price`는 시세 조회 실패 시의 대체값입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    /// 종목코드
    pub code: String,
    /// 종목명
    pub name: String,
    /// 종목약어명
    pub short_name: String,
    /// 시장구분
    pub market_type: String,
    /// 통화
    pub currency: String,
    /// 마지막으로 알려진 현재가
    pub last_price: Price,
}

impl Instrument {
    /// 새 종목을 생성합니다.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: code.into(),
            short_name: name.clone(),
            name,
            market_type: String::new(),
            currency: "KRW".to_string(),
            last_price: Decimal::ZERO,
        }
    }

    /// 통화를 설정합니다.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// 마지막 현재가를 설정합니다.
    pub fn with_last_price(mut self, price: Price) -> Self {
        self.last_price = price;
        self
    }

    /// 표시용 이름을 반환합니다 (약어명 우선).
    pub fn display_name(&self) -> &str {
        if self.short_name.is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }
}

/// 종목 마스터에서 이름 풀을 추출합니다 (공백 이름 제외, 중복 제거).
pub fn name_pool(instruments: &[Instrument]) -> Vec<String> {
    let mut pool: Vec<String> = Vec::new();
    for inst in instruments {
        if !inst.name.is_empty() && !pool.contains(&inst.name) {
            pool.push(inst.name.clone());
        }
    }
    pool
}

/// 종목명 → 종목코드 매핑을 만듭니다.
pub fn code_map(instruments: &[Instrument]) -> HashMap<String, String> {
    instruments
        .iter()
        .filter(|i| !i.name.is_empty())
        .map(|i| (i.name.clone(), i.code.clone()))
        .collect()
}
