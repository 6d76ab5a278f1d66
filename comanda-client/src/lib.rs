//! Comanda Client - 顾客端编排库
//!
//! REST API 的类型化 HTTP 客户端、localStorage 式的本地存储，
//! 以及订座/购物车向导。服务端推送只是提前刷新的信号，
//! 这里的轮询才是事实来源。

pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod reservation;
pub mod session;
pub mod store;
pub mod tracking;

pub use cart::CartSession;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use reservation::{BookingType, HandoffTarget, ReservationFlow, TABLE_PRICE};
pub use store::{LocalStore, StoreError};
pub use tracking::{OrderTracker, POLL_INTERVAL};

// Re-export shared types for convenience
pub use shared::{ApiResponse, LoginResponse, PendingIntent, UserInfo};
