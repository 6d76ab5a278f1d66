//! 订单追踪 - HTTP 轮询兜底
//!
//! 推送（socket 房间）是尽力而为的，轮询才是事实来源：界面每
//! [`POLL_INTERVAL`] 调一次 [`OrderTracker::refresh`]，推送只用来
//! 提前触发一次刷新。

use std::time::Duration;

use shared::{OrderChannel, OrderView};

use crate::error::ClientResult;
use crate::http::HttpClient;

/// 轮询间隔
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// 订单追踪器，按单号轮询一张订单
pub struct OrderTracker<C> {
    http: C,
    channel: OrderChannel,
    code: String,
}

impl<C: HttpClient> OrderTracker<C> {
    pub fn new(http: C, channel: OrderChannel, code: impl Into<String>) -> Self {
        Self {
            http,
            channel,
            code: code.into(),
        }
    }

    /// 追踪的单号
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 界面轮询节奏
    pub fn poll_interval(&self) -> Duration {
        POLL_INTERVAL
    }

    /// 拉一次最新状态
    pub async fn refresh(&self) -> ClientResult<OrderView> {
        self.http.track_order(self.channel, &self.code).await
    }
}
