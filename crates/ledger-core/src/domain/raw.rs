//! 증권사에서 내려받은 원본 레코드.
//!
//! 세 가지 원본 피드를 정의합니다:
//! - `RawTransaction` - 종합 거래원장 (결제일 기준)
//! - `TradeLogEntry` - 국내 매매일지 (매매일 기준, 계좌+일자+종목명 단위 집계)
//! - `OverseasTradeLogEntry` - 해외 매매일지 (계좌+일자+종목코드 단위 집계)
//!
//! 원본 레코드는 불변이며 매 임포트마다 전체가 교체됩니다. 셀 단위
//! 타입 변환(숫자 파싱, 공백 기본값)은 상류 임포트 단계에서 끝난 상태입니다.

use crate::types::{Price, Quantity};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Instrument;

/// 종합 거래원장의 원본 행.
///
/// `settlement_date`는 결제일이며, 주식 입출고의 경우 실제 매매일보다
/// 청산 주기(T+2)만큼 늦을 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    /// 계좌
    pub account: String,
    /// 거래일자 (결제일)
    pub settlement_date: NaiveDate,
    /// 거래번호 (계좌+일자 내 순번)
    pub sequence_no: String,
    /// 거래종류 (증권사 자유 텍스트 코드, 예: "주식매수입고")
    pub kind_label: String,
    /// 거래명 (원본 종목명, 노이즈 포함 가능)
    pub name: String,
    /// 수량
    pub quantity: Quantity,
    /// 단가
    pub price: Price,
    /// 거래금액 (원화)
    pub amount: Decimal,
    /// 외화거래금액
    pub foreign_amount: Decimal,
    /// 외화입출금액
    pub foreign_dw_amount: Decimal,
    /// 수수료
    pub fee: Decimal,
    /// 제세금합
    pub tax: Decimal,
    /// 통화코드 (공백이면 KRW)
    pub currency_code: String,
    /// 상대기관
    pub counterparty_agency: String,
    /// 상대계좌번호
    pub counterparty_account: String,
}

impl RawTransaction {
    /// 새 원본 행을 생성합니다. 금액 필드는 0으로 시작합니다.
    pub fn new(
        account: impl Into<String>,
        settlement_date: NaiveDate,
        sequence_no: impl Into<String>,
        kind_label: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            settlement_date,
            sequence_no: sequence_no.into(),
            kind_label: kind_label.into(),
            name: name.into(),
            quantity: Decimal::ZERO,
            price: Decimal::ZERO,
            amount: Decimal::ZERO,
            foreign_amount: Decimal::ZERO,
            foreign_dw_amount: Decimal::ZERO,
            fee: Decimal::ZERO,
            tax: Decimal::ZERO,
            currency_code: String::new(),
            counterparty_agency: String::new(),
            counterparty_account: String::new(),
        }
    }

    /// 수량을 설정합니다.
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// 단가를 설정합니다.
    pub fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    /// 거래금액을 설정합니다.
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// 외화거래금액을 설정합니다.
    pub fn with_foreign_amount(mut self, foreign_amount: Decimal) -> Self {
        self.foreign_amount = foreign_amount;
        self
    }

    /// 외화입출금액을 설정합니다.
    pub fn with_foreign_dw_amount(mut self, foreign_dw_amount: Decimal) -> Self {
        self.foreign_dw_amount = foreign_dw_amount;
        self
    }

    /// 수수료를 설정합니다.
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = fee;
        self
    }

    /// 세금을 설정합니다.
    pub fn with_tax(mut self, tax: Decimal) -> Self {
        self.tax = tax;
        self
    }

    /// 통화코드를 설정합니다.
    pub fn with_currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into();
        self
    }
}

/// 국내 매매일지의 원본 행.
///
/// 키: (계좌, 매매일자, 종목명). 증권사가 직접 계산한 손익과 수익률을
/// 담고 있어 일자 보정과 손익 대조의 기준 자료로 쓰입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeLogEntry {
    /// 계좌
    pub account: String,
    /// 매매일자 (실제 체결일)
    pub trade_date: NaiveDate,
    /// 종목명
    pub name: String,
    /// 매수수량
    pub buy_quantity: Quantity,
    /// 매수평균단가
    pub buy_price: Price,
    /// 매수금액
    pub buy_amount: Decimal,
    /// 매도수량
    pub sell_quantity: Quantity,
    /// 매도평균단가
    pub sell_price: Price,
    /// 매도금액
    pub sell_amount: Decimal,
    /// 매매비용
    pub trade_fee: Decimal,
    /// 손익금액
    pub profit_loss: Decimal,
    /// 수익률
    pub yield_rate: Decimal,
}

impl TradeLogEntry {
    /// 새 매매일지 행을 생성합니다.
    pub fn new(
        account: impl Into<String>,
        trade_date: NaiveDate,
        name: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            trade_date,
            name: name.into(),
            buy_quantity: Decimal::ZERO,
            buy_price: Decimal::ZERO,
            buy_amount: Decimal::ZERO,
            sell_quantity: Decimal::ZERO,
            sell_price: Decimal::ZERO,
            sell_amount: Decimal::ZERO,
            trade_fee: Decimal::ZERO,
            profit_loss: Decimal::ZERO,
            yield_rate: Decimal::ZERO,
        }
    }

    /// 손익과 수익률을 설정합니다.
    pub fn with_profit(mut self, profit_loss: Decimal, yield_rate: Decimal) -> Self {
        self.profit_loss = profit_loss;
        self.yield_rate = yield_rate;
        self
    }
}

/// 해외 매매일지의 원본 행.
///
/// 키: (계좌, 매매일자, 종목코드). 매매손익은 외화 기준입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverseasTradeLogEntry {
    /// 계좌
    pub account: String,
    /// 매매일자 (실제 체결일)
    pub trade_date: NaiveDate,
    /// 통화
    pub currency: String,
    /// 종목코드
    pub code: String,
    /// 종목명
    pub name: String,
    /// 매수수량
    pub buy_quantity: Quantity,
    /// 매수단가
    pub buy_price: Price,
    /// 매수금액 (외화)
    pub buy_amount: Decimal,
    /// 매도수량
    pub sell_quantity: Quantity,
    /// 매도단가
    pub sell_price: Price,
    /// 매도금액 (외화)
    pub sell_amount: Decimal,
    /// 수수료
    pub fee: Decimal,
    /// 세금
    pub tax: Decimal,
    /// 매매손익 (외화)
    pub trading_profit: Decimal,
    /// 손익률
    pub yield_rate: Decimal,
}

impl OverseasTradeLogEntry {
    /// 새 해외 매매일지 행을 생성합니다.
    pub fn new(
        account: impl Into<String>,
        trade_date: NaiveDate,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            trade_date,
            currency: "USD".to_string(),
            code: code.into(),
            name: name.into(),
            buy_quantity: Decimal::ZERO,
            buy_price: Decimal::ZERO,
            buy_amount: Decimal::ZERO,
            sell_quantity: Decimal::ZERO,
            sell_price: Decimal::ZERO,
            sell_amount: Decimal::ZERO,
            fee: Decimal::ZERO,
            tax: Decimal::ZERO,
            trading_profit: Decimal::ZERO,
            yield_rate: Decimal::ZERO,
        }
    }

    /// 매매손익과 손익률을 설정합니다.
    pub fn with_profit(mut self, trading_profit: Decimal, yield_rate: Decimal) -> Self {
        self.trading_profit = trading_profit;
        self.yield_rate = yield_rate;
        self
    }
}

/// 한 번의 임포트로 들어온 원본 데이터 전체 스냅샷.
///
/// 정산 엔진의 입력 단위입니다. 세 피드와 종목 마스터를 함께 담으며,
/// 엔진은 이 스냅샷 전체를 읽어 파생 테이블 전체를 다시 만듭니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawImport {
    /// 종합 거래원장
    pub transactions: Vec<RawTransaction>,
    /// 국내 매매일지
    pub trade_logs: Vec<TradeLogEntry>,
    /// 해외 매매일지
    pub overseas_trade_logs: Vec<OverseasTradeLogEntry>,
    /// 종목 마스터
    pub instruments: Vec<Instrument>,
}

impl RawImport {
    /// 원장 행이 하나도 없는 임포트인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
