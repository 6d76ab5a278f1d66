//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - 日志、时间、输入校验等工具

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult};
pub use error::{ok, ok_with_message};
