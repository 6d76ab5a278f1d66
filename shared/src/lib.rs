//! Shared types for the Comanda platform
//!
//! Wire-visible types used by both the server and the client crates:
//! response envelope, order/reservation/inventory vocabularies, realtime
//! event names and the persisted pending-intent value object.

pub mod auth;
pub mod events;
pub mod feedback;
pub mod intent;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Response envelope
pub use response::ApiResponse;

// Auth vocabulary
pub use auth::{
    CustomerLoginRequest, LoginResponse, RegisterCustomerRequest, RegisterStaffRequest,
    StaffLoginRequest, StaffRole, UserInfo,
};

// Order vocabulary
pub use order::{
    CookingStatus, CreateOrderRequest, FulfilmentType, OrderChannel, OrderItem, OrderPriority,
    OrderStatus, OrderStatusChanged, OrderView, UpdateOrderStatusRequest,
};

// Reservation vocabulary
pub use reservation::{
    BOOKING_WINDOW_DAYS, CreateReservationRequest, ReservationStatus, ReservationView,
    TABLE_UNIVERSE, TIME_SLOTS, TableAvailability, UpdateReservationStatusRequest,
};

// Inventory vocabulary
pub use inventory::{AdjustAction, CreateInventoryRequest, InventoryStatus, UpdateInventoryRequest};

// Menu vocabulary
pub use menu::{
    CreateMenuItemRequest, MenuCategory, MenuItemView, SpiceLevel, UpdateMenuItemRequest,
};

// Feedback vocabulary
pub use feedback::{FeedbackKind, FeedbackView, ItemRating, SubmitFeedbackRequest};

// Client-side persisted intent
pub use intent::{PendingIntent, keys};
