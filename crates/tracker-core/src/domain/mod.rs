//! 주문 추적을 위한 도메인 모델.

mod order;

pub use order::*;
