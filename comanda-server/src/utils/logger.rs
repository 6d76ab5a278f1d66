//! Logging Infrastructure
//!
//! Tracing 初始化。默认写 stdout；给了日志目录就按天滚动写文件，
//! 目录不存在时先创建，创建失败再退回 stdout。

use std::path::Path;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, _json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "comanda-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
        eprintln!("Cannot use log directory {dir}, falling back to stdout");
    }

    subscriber.init();
}
