//! HTTP 客户端 - 网络通信
//!
//! 所有响应走统一信封 `{success, message, data}`。成功状态解出 `data`，
//! 失败状态连同信封里的 `message` 一起映射到 [`ClientError`]。

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::{
    ApiResponse, CreateOrderRequest, CreateReservationRequest, CustomerLoginRequest, FeedbackView,
    LoginResponse, MenuItemView, OrderChannel, OrderView, RegisterCustomerRequest, ReservationView,
    SubmitFeedbackRequest, TableAvailability,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// 按渠道选择追踪路径。服务端按单号全表查找，编号前缀已区分渠道，
/// 所以预订单也走 orders 的追踪路由。
pub(crate) fn track_path(channel: OrderChannel, code: &str) -> String {
    match channel {
        OrderChannel::DineInQr => format!("api/qr-orders/track/{}", code),
        _ => format!("api/orders/track/{}", code),
    }
}

/// 按状态码与响应体解开信封
fn unwrap_envelope<T: DeserializeOwned>(status: StatusCode, text: &str) -> ClientResult<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(text)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| text.to_string());
        return Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        });
    }

    let envelope: ApiResponse<T> = serde_json::from_str(text)?;
    if !envelope.success {
        return Err(ClientError::Internal(
            envelope.message.unwrap_or_else(|| "Unknown error".into()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
}

/// HTTP 客户端 trait
///
/// 泛型动词负责传输；类型化的 Comanda API 在默认方法里拼路径，
/// 测试替身只需实现动词就得到整套 API。
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: Option<String>);

    // ========== Customer accounts ==========

    /// 顾客注册，注册即登录
    async fn register_customer(
        &self,
        req: &RegisterCustomerRequest,
    ) -> ClientResult<LoginResponse> {
        self.post("api/customers/register", req).await
    }

    /// 顾客登录，换取 JWT
    async fn login_customer(&self, req: &CustomerLoginRequest) -> ClientResult<LoginResponse> {
        self.post("api/customers/login", req).await
    }

    // ========== Reservations ==========

    /// 查询某日某时段的可用/已订桌位
    async fn availability(&self, date: &str, time_slot: &str) -> ClientResult<TableAvailability> {
        self.get(&format!(
            "api/table-reservations/availability?date={}&timeSlot={}",
            date, time_slot
        ))
        .await
    }

    /// 创建订座，冲突时返回 [`ClientError::Conflict`] 并指名重叠桌号
    async fn create_reservation(
        &self,
        req: &CreateReservationRequest,
    ) -> ClientResult<ReservationView> {
        self.post("api/table-reservations", req).await
    }

    // ========== Orders ==========

    /// 结账页下单 (staff-entered 渠道)
    async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<OrderView> {
        self.post("api/orders/public", req).await
    }

    /// 扫码下单，`tableNumber` 必填
    async fn create_qr_order(&self, req: &CreateOrderRequest) -> ClientResult<OrderView> {
        self.post("api/qr-orders/public", req).await
    }

    /// 预订单，`scheduledFor` 必填
    async fn create_pre_order(&self, req: &CreateOrderRequest) -> ClientResult<OrderView> {
        self.post("api/pre-orders", req).await
    }

    /// 按单号追踪
    async fn track_order(&self, channel: OrderChannel, code: &str) -> ClientResult<OrderView> {
        self.get(&track_path(channel, code)).await
    }

    // ========== Menu and feedback ==========

    /// 菜单，可选按分类过滤 (分类词表含空格，手动转义)
    async fn menu(&self, category: Option<&str>) -> ClientResult<Vec<MenuItemView>> {
        let path = match category {
            Some(category) => format!("api/menu?category={}", category.replace(' ', "%20")),
            None => "api/menu".to_string(),
        };
        self.get(&path).await
    }

    /// 提交评价，每单一次，重复提交 409
    async fn submit_feedback(&self, req: &SubmitFeedbackRequest) -> ClientResult<FeedbackView> {
        self.post("api/feedback", req).await
    }
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;
        unwrap_envelope(status, &text)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut req = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut req = self.client.put(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut req = self.client.delete(self.url(path));
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_data_unwrapped() {
        let body = r#"{"success":true,"data":{"availableTables":[3,4],"reservedTables":[1,2,5,6,7,8]}}"#;
        let availability: TableAvailability = unwrap_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(availability.available_tables, vec![3, 4]);
    }

    #[test]
    fn test_conflict_carries_envelope_message() {
        let body = r#"{"success":false,"message":"Tables 2 are already reserved for 2025-06-01 at 18:00-19:00"}"#;
        let err = unwrap_envelope::<TableAvailability>(StatusCode::CONFLICT, body).unwrap_err();
        match err {
            ClientError::Conflict(message) => {
                assert_eq!(
                    message,
                    "Tables 2 are already reserved for 2025-06-01 at 18:00-19:00"
                );
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"success":false,"message":"nope"}"#;
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::UNAUTHORIZED, body),
            Err(ClientError::Unauthorized(_))
        ));
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::FORBIDDEN, body),
            Err(ClientError::Forbidden(_))
        ));
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::NOT_FOUND, body),
            Err(ClientError::NotFound(_))
        ));
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::BAD_REQUEST, body),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::INTERNAL_SERVER_ERROR, body),
            Err(ClientError::Internal(_))
        ));
    }

    #[test]
    fn test_non_json_error_body_passes_through() {
        let err = unwrap_envelope::<serde_json::Value>(StatusCode::BAD_REQUEST, "plain failure")
            .unwrap_err();
        match err {
            ClientError::Validation(message) => assert_eq!(message, "plain failure"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_success_false_on_ok_status() {
        let body = r#"{"success":false,"message":"store offline"}"#;
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::OK, body),
            Err(ClientError::Internal(_))
        ));
    }

    #[test]
    fn test_missing_data_is_invalid_response() {
        let body = r#"{"success":true,"message":"done"}"#;
        assert!(matches!(
            unwrap_envelope::<serde_json::Value>(StatusCode::OK, body),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_track_path_by_channel() {
        assert_eq!(
            track_path(OrderChannel::DineInQr, "QR001"),
            "api/qr-orders/track/QR001"
        );
        assert_eq!(
            track_path(OrderChannel::Staff, "ORD001"),
            "api/orders/track/ORD001"
        );
        assert_eq!(
            track_path(OrderChannel::Scheduled, "PRE001"),
            "api/orders/track/PRE001"
        );
    }
}
