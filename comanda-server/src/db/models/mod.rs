//! Database models
//!
//! 所有模型以 camelCase 存储字段，与前端约定一致。
//! id 使用 SurrealDB RecordId，序列化为 "table:id" 字符串。

pub mod customer;
pub mod feedback;
pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod serde_helpers;
pub mod staff_user;

pub use customer::Customer;
pub use feedback::Feedback;
pub use inventory::InventoryItem;
pub use menu_item::MenuItem;
pub use order::Order;
pub use reservation::Reservation;
pub use staff_user::StaffUser;
