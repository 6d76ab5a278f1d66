//! Webhook 通知
//!
//! 邮件投递本身在平台之外，这里只保留控制流：状态流转后把
//! 通知消息 POST 到配置的 webhook。发送放在 spawn 的任务里，
//! 失败记日志后丢弃，不重试，绝不阻塞订单流转。

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::utils::{AppError, AppResult};

/// 通知消息体，webhook 收到的 JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyMessage {
    /// feedback-request / order-cancelled
    pub kind: &'static str,
    pub order_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub customer_name: String,
    pub message: String,
}

#[derive(Clone)]
pub struct Notifier {
    client: Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build notifier client: {e}")))?;
        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// 预订单完成后邀请顾客评价
    pub fn feedback_request(&self, order_code: &str, recipient: &str, customer_name: &str) {
        self.dispatch(NotifyMessage {
            kind: "feedback-request",
            order_code: order_code.to_string(),
            recipient: Some(recipient.to_string()),
            customer_name: customer_name.to_string(),
            message: format!(
                "Thanks {}! Your order {} is complete. We would love to hear your feedback.",
                customer_name, order_code
            ),
        });
    }

    /// 预订单取消告知
    pub fn cancellation(&self, order_code: &str, recipient: Option<&str>, customer_name: &str) {
        self.dispatch(NotifyMessage {
            kind: "order-cancelled",
            order_code: order_code.to_string(),
            recipient: recipient.map(|r| r.to_string()),
            customer_name: customer_name.to_string(),
            message: format!("Your order {} has been cancelled.", order_code),
        });
    }

    fn dispatch(&self, message: NotifyMessage) {
        let Some(url) = self.webhook_url.clone() else {
            debug!(
                target: "notify",
                "No webhook configured, dropping {} for {}", message.kind, message.order_code
            );
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&message).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    warn!(
                        target: "notify",
                        "Webhook rejected {} for {}: {} {}",
                        message.kind, message.order_code, status, body
                    );
                }
                Ok(_) => {
                    debug!(
                        target: "notify",
                        "Delivered {} for {}", message.kind, message.order_code
                    );
                }
                Err(e) => {
                    warn!(
                        target: "notify",
                        "Webhook delivery failed, {} for {}: {}",
                        message.kind, message.order_code, e
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_notifier_drops_silently() {
        let notifier = Notifier::new(None).unwrap();
        notifier.feedback_request("PRE001", "meera@example.com", "Meera");
        notifier.cancellation("PRE002", None, "Ravi");
    }

    #[test]
    fn test_message_wire_shape() {
        let msg = NotifyMessage {
            kind: "feedback-request",
            order_code: "PRE007".into(),
            recipient: Some("meera@example.com".into()),
            customer_name: "Meera".into(),
            message: "hello".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["orderCode"], "PRE007");
        assert_eq!(json["customerName"], "Meera");
        assert_eq!(json["kind"], "feedback-request");
    }
}
