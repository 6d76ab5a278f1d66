//! Post-order feedback vocabulary
//!
//! Two body shapes are accepted: the legacy per-item ratings list and the
//! unified service/food pair. One submission per order code.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which kind of order the feedback refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Qr,
    Pre,
    Reservation,
}

/// Legacy per-item rating entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemRating {
    pub name: String,
    /// 1..=5 stars
    pub rating: i32,
}

/// Submit-feedback request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    #[validate(length(min = 1, max = 50, message = "Order code is required"))]
    pub order_code: String,
    pub order_type: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Legacy shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_ratings: Option<Vec<ItemRating>>,
    /// Unified shape
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_rating: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Rating must be 1-5"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_rating: Option<i32>,
    #[validate(length(max = 500, message = "Comment too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl SubmitFeedbackRequest {
    /// Average across whichever rating shape was supplied.
    ///
    /// Item ratings take precedence; otherwise the mean of the unified
    /// pair (or of the single one present). `None` when no rating at all
    /// was given.
    pub fn average_rating(&self) -> Option<f64> {
        if let Some(items) = &self.item_ratings {
            if !items.is_empty() {
                let sum: i32 = items.iter().map(|r| r.rating).sum();
                return Some(sum as f64 / items.len() as f64);
            }
        }
        match (self.service_rating, self.food_rating) {
            (Some(s), Some(f)) => Some((s + f) as f64 / 2.0),
            (Some(s), None) => Some(s as f64),
            (None, Some(f)) => Some(f as f64),
            (None, None) => None,
        }
    }
}

/// Wire view of a stored feedback entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_code: String,
    pub order_type: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub item_ratings: Vec<ItemRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub average_rating: f64,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> SubmitFeedbackRequest {
        SubmitFeedbackRequest {
            order_code: "QR001".to_string(),
            order_type: FeedbackKind::Qr,
            customer_name: None,
            item_ratings: None,
            service_rating: None,
            food_rating: None,
            comment: None,
        }
    }

    #[test]
    fn test_item_ratings_take_precedence() {
        let mut req = base_request();
        req.item_ratings = Some(vec![
            ItemRating { name: "Biryani".to_string(), rating: 5 },
            ItemRating { name: "Lassi".to_string(), rating: 4 },
        ]);
        req.service_rating = Some(1);
        assert_eq!(req.average_rating(), Some(4.5));
    }

    #[test]
    fn test_unified_pair_average() {
        let mut req = base_request();
        req.service_rating = Some(4);
        req.food_rating = Some(5);
        assert_eq!(req.average_rating(), Some(4.5));
    }

    #[test]
    fn test_no_ratings() {
        assert_eq!(base_request().average_rating(), None);
    }
}
