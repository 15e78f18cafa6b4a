// アプリケーション層
// ポートを調停するユースケースの実装

pub mod error;
pub mod service;

pub use error::ApplicationError;
