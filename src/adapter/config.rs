use std::env;

/// サーバー設定を管理する構造体
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// この数以下の在庫を「残りわずか」と表示する閾値
    pub low_stock_threshold: u32,
    /// 在庫上限が未拘束の明細に適用するステッパー上限
    pub fallback_max_quantity: u32,
}

/// 設定エラー
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// 環境変数から設定を読み取る
    /// 環境変数が設定されていない場合はデフォルト値を使用
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid SERVER_PORT: {}", e)))?;

        let low_stock_threshold = env::var("LOW_STOCK_THRESHOLD")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid LOW_STOCK_THRESHOLD: {}", e))
            })?;

        let fallback_max_quantity = env::var("FALLBACK_MAX_QUANTITY")
            .unwrap_or_else(|_| "99".to_string())
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid FALLBACK_MAX_QUANTITY: {}", e))
            })?;

        Ok(Self {
            host,
            port,
            low_stock_threshold,
            fallback_max_quantity,
        })
    }

    /// リッスンアドレスを生成
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
