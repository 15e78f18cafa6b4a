use crate::domain::port::{LogLevel, Logger};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// コンソールログ実装
/// `[時刻][レベル][コンポーネント]` 形式の構造化された1行を
/// 標準出力・標準エラー出力に書き出す
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }

    fn format_line(
        level: LogLevel,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<&HashMap<String, String>>,
    ) -> String {
        let level_str = match level {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        };

        let mut parts = vec![
            format!("[{}]", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
            format!("[{}]", level_str),
            format!("[{}]", component),
        ];

        if let Some(correlation_id) = correlation_id {
            parts.push(format!("[correlation_id: {}]", correlation_id));
        }

        parts.push(message.to_string());

        if let Some(context) = context {
            if !context.is_empty() {
                let context_str = context
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                parts.push(format!("[{}]", context_str));
            }
        }

        parts.join(" ")
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        println!(
            "{}",
            Self::format_line(
                LogLevel::Debug,
                component,
                message,
                correlation_id,
                context.as_ref()
            )
        );
    }

    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        println!(
            "{}",
            Self::format_line(
                LogLevel::Info,
                component,
                message,
                correlation_id,
                context.as_ref()
            )
        );
    }

    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        println!(
            "{}",
            Self::format_line(
                LogLevel::Warning,
                component,
                message,
                correlation_id,
                context.as_ref()
            )
        );
    }

    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    ) {
        eprintln!(
            "{}",
            Self::format_line(
                LogLevel::Error,
                component,
                message,
                correlation_id,
                context.as_ref()
            )
        );
    }
}
