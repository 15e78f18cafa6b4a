// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::event::DomainEvent;
use crate::domain::model::{Cart, CatalogItem, MedicationId, OrderCode, SessionId};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 情報レベルのログを出力
    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 警告レベルのログを出力
    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// エラーレベルのログを出力
    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );
}

/// リポジトリエラー型
/// セッションストア・カタログ操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// カートリポジトリトレイト
/// セッション単位のカート保管を抽象化する。
/// 保管はセッションのライフサイクルに閉じ、永続ストアではない。
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// カートを保存する
    ///
    /// # Arguments
    /// * `cart` - 保存するカート
    ///
    /// # Returns
    /// * `Ok(())` - 保存成功
    /// * `Err(RepositoryError)` - 保存失敗
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;

    /// セッションIDでカートを検索する
    ///
    /// # Arguments
    /// * `session_id` - 検索するセッションID
    ///
    /// # Returns
    /// * `Ok(Some(Cart))` - カートが見つかった
    /// * `Ok(None)` - セッションが開始されていない
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_session(&self, session_id: SessionId) -> Result<Option<Cart>, RepositoryError>;

    /// セッションのカートを破棄する
    ///
    /// # Arguments
    /// * `session_id` - 破棄するセッションID
    async fn remove(&self, session_id: SessionId) -> Result<(), RepositoryError>;

    /// 新しい一意のセッションIDを生成する
    fn next_identity(&self) -> SessionId;
}

/// カタログプロバイダートレイト
/// 外部カタログへの読み取り専用の問い合わせを抽象化する。
/// コアからカタログへの書き込み経路は存在しない。
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// 医薬品IDでカタログ項目を検索する
    ///
    /// # Returns
    /// * `Ok(Some(CatalogItem))` - 項目が見つかった
    /// * `Ok(None)` - 項目が存在しない
    /// * `Err(RepositoryError)` - 取得失敗
    async fn find_by_id(
        &self,
        medication_id: &MedicationId,
    ) -> Result<Option<CatalogItem>, RepositoryError>;

    /// すべてのカタログ項目を取得する
    async fn find_all(&self) -> Result<Vec<CatalogItem>, RepositoryError>;

    /// 名称・説明・カテゴリの部分一致で検索する
    ///
    /// # Arguments
    /// * `query` - 検索文字列（大文字小文字を区別しない）
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, RepositoryError>;
}

/// 注文コード生成器トレイト
/// 確定時に払い出す人間可読なコードの供給元を抽象化する
pub trait OrderCodeGenerator: Send + Sync {
    /// 次の注文コードを生成する
    fn next_code(&self) -> OrderCode;
}

/// イベントバスエラー
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event publishing failed: {0}")]
    PublishingFailed(String),
}

/// イベントバストレイト
/// イベントの発行と配信を管理するポート
#[async_trait]
pub trait EventBus: Send + Sync {
    /// イベントを発行し、登録されたハンドラーに配信
    async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError>;
}
