//! 시세 조회 경계.
//!
//! 시세 수집은 엔진 외부의 협력자가 담당합니다. 엔진은 이 trait을
//! 통해 현재가를 요청할 뿐이며, 조회 실패는 "마지막으로 알려진 가격
//! 사용"으로 처리하고 절대 하드 에러로 만들지 않습니다.

use ledger_core::{Instrument, Price};
use std::collections::HashMap;

/// 현재가 조회 능력.
///
/// 호출자가 구성한 시세 소스(웹 API, 캐시 등)를 감싸 구현합니다.
/// 동기 호출이며, 시세 수집 자체는 정산 실행 전에 끝나 있어야 합니다.
pub trait PriceSource {
    /// 종목의 현재가를 반환합니다. 조회 불가 시 `None`.
    fn current_price(&self, code: &str) -> Option<Price>;
}

/// 고정 시세 테이블 (테스트/오프라인 평가용).
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: HashMap<String, Price>,
}

impl StaticPriceSource {
    /// 빈 시세 테이블을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시세 하나를 추가합니다.
    pub fn with_price(mut self, code: impl Into<String>, price: Price) -> Self {
        self.prices.insert(code.into(), price);
        self
    }
}

impl PriceSource for StaticPriceSource {
    fn current_price(&self, code: &str) -> Option<Price> {
        self.prices.get(code).copied()
    }
}

/// 시세 소스에서 현재가를 구하고, 실패하면 종목 마스터의 마지막
/// 가격으로 대체합니다.
pub fn resolve_price(source: &dyn PriceSource, instrument: &Instrument) -> Price {
    source
        .current_price(&instrument.code)
        .unwrap_or(instrument.last_price)
}
