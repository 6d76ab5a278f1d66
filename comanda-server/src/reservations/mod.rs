//! 订座域

pub mod service;

pub use service::ReservationService;
