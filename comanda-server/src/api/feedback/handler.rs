//! 评价处理器

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Feedback;
use crate::db::repository::FeedbackRepository;
use crate::utils::AppResult;
use crate::utils::error::{ok, ok_with_message};
use crate::utils::time::now_millis;
use crate::utils::validation::validate_body;

use shared::{ApiResponse, SubmitFeedbackRequest};

/// 提交评价
///
/// 平均分在落库前重算；同一单号的第二次提交返回 409
pub async fn submit(
    State(state): State<ServerState>,
    Json(req): Json<SubmitFeedbackRequest>,
) -> AppResult<Json<ApiResponse<Feedback>>> {
    validate_body(&req)?;

    let repo = FeedbackRepository::new(state.restaurant_db());
    let feedback = repo
        .create(Feedback::from_request(req, now_millis()))
        .await?;

    Ok(ok_with_message(feedback, "Thank you for your feedback"))
}

/// 评价列表 (后台)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Feedback>>>> {
    let repo = FeedbackRepository::new(state.restaurant_db());
    let entries = repo.find_all().await?;
    Ok(ok(entries))
}
