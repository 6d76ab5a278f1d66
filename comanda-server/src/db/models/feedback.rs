//! 顾客评价数据模型

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::feedback::{FeedbackKind, ItemRating, SubmitFeedbackRequest};

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 每个订单编号只允许一条评价
    pub order_code: String,
    pub order_type: FeedbackKind,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub item_ratings: Vec<ItemRating>,
    #[serde(default)]
    pub service_rating: Option<f64>,
    #[serde(default)]
    pub food_rating: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    /// 提交时算好存下来，列表页直接用
    #[serde(default)]
    pub average_rating: Option<f64>,
    pub created_at: i64,
}

impl Feedback {
    pub fn from_request(req: SubmitFeedbackRequest, now: i64) -> Self {
        let average_rating = req.average_rating();
        Self {
            id: None,
            order_code: req.order_code,
            order_type: req.order_type,
            customer_name: req.customer_name,
            item_ratings: req.item_ratings,
            service_rating: req.service_rating,
            food_rating: req.food_rating,
            comment: req.comment,
            average_rating,
            created_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_precomputed_from_item_ratings() {
        let req: SubmitFeedbackRequest = serde_json::from_value(serde_json::json!({
            "orderCode": "QR012",
            "orderType": "qr",
            "itemRatings": [
                {"name": "Paneer Tikka", "rating": 5.0},
                {"name": "Garlic Naan", "rating": 4.0}
            ]
        }))
        .unwrap();
        let fb = Feedback::from_request(req, 99);
        assert_eq!(fb.average_rating, Some(4.5));
        assert_eq!(fb.order_type, FeedbackKind::Qr);
        assert_eq!(fb.created_at, 99);
    }
}
