use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;

/// 服务器配置 - 平台服务端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/comanda | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | Asia/Kolkata | 餐厅营业时区 |
/// | NOTIFY_WEBHOOK_URL | (无) | 通知 webhook 地址，未配置则只记日志 |
/// | CORS_ORIGIN | (无) | 允许的跨域来源，未配置则放开 |
/// | ADMIN_USERNAME | admin | 首次启动时创建的管理员账号 |
/// | ADMIN_PASSWORD | admin123 | 管理员初始密码 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/comanda HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 餐厅营业时区，所有日期归一化以此为准
    pub timezone: Tz,
    /// 通知 webhook 地址 (订单完成/取消邮件的投递出口)
    pub notify_webhook_url: Option<String>,
    /// 允许的跨域来源
    pub cors_origin: Option<String>,
    /// 首次启动时创建的管理员账号
    pub admin_username: String,
    /// 管理员初始密码 (生产环境务必通过环境变量覆盖)
    pub admin_password: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kolkata),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL").ok(),
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
