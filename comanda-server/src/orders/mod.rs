//! 订单域

pub mod lifecycle;

pub use lifecycle::OrderLifecycle;
