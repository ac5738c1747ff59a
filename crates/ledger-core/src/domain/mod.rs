//! 정산 엔진을 위한 도메인 모델.

mod instrument;
mod portfolio;
mod raw;
mod status;
mod transaction;

pub use instrument::*;
pub use portfolio::*;
pub use raw::*;
pub use status::*;
pub use transaction::*;
