use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::event::{ItemAddedToCart, OrderConfirmed};
use crate::domain::event_bus::{EventHandler, HandlerError};
use crate::domain::port::Logger;

/// 処理済みイベントを追跡するためのトラッカー
/// 同じイベントの再配信で通知が重複しないようにする
#[derive(Clone)]
pub struct ProcessedEventTracker {
    processed_events: Arc<Mutex<HashSet<Uuid>>>,
}

impl Default for ProcessedEventTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessedEventTracker {
    pub fn new() -> Self {
        Self {
            processed_events: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// イベントが既に処理済みかチェック
    pub async fn is_processed(&self, event_id: Uuid) -> bool {
        let processed = self.processed_events.lock().await;
        processed.contains(&event_id)
    }

    /// イベントを処理済みとしてマーク
    pub async fn mark_processed(&self, event_id: Uuid) {
        let mut processed = self.processed_events.lock().await;
        processed.insert(event_id);
    }
}

/// 買い物客向け通知ハンドラー
/// カート追加と注文確定を受信して、買い物客に見せる確認メッセージを
/// 通知チャネル（ここではログ）へ流す
#[derive(Clone)]
pub struct ShopperNotificationHandler {
    processed_events: ProcessedEventTracker,
    logger: Arc<dyn Logger>,
}

impl ShopperNotificationHandler {
    /// 新しい通知ハンドラーを作成
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            processed_events: ProcessedEventTracker::new(),
            logger,
        }
    }
}

#[async_trait]
impl EventHandler<ItemAddedToCart> for ShopperNotificationHandler {
    async fn handle(&self, event: ItemAddedToCart) -> Result<(), HandlerError> {
        // 冪等性チェック: 既に処理済みのイベントかどうか確認
        if self.processed_events.is_processed(event.metadata.event_id).await {
            return Ok(());
        }

        let unit_word = if event.quantity == 1 {
            "unidad agregada"
        } else {
            "unidades agregadas"
        };
        let mut context = HashMap::new();
        context.insert("session_id".to_string(), event.session_id.to_string());
        context.insert(
            "medication_id".to_string(),
            event.medication_id.to_string(),
        );
        self.logger.info(
            "ShopperNotificationHandler",
            &format!(
                "{} {} al carrito: {}",
                event.quantity, unit_word, event.display_name
            ),
            Some(event.metadata.correlation_id),
            Some(context),
        );

        self.processed_events
            .mark_processed(event.metadata.event_id)
            .await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler<OrderConfirmed> for ShopperNotificationHandler {
    async fn handle(&self, event: OrderConfirmed) -> Result<(), HandlerError> {
        if self.processed_events.is_processed(event.metadata.event_id).await {
            return Ok(());
        }

        let mut context = HashMap::new();
        context.insert("session_id".to_string(), event.session_id.to_string());
        context.insert("line_count".to_string(), event.lines.len().to_string());
        context.insert(
            "grand_total".to_string(),
            event.grand_total.formatted(),
        );
        self.logger.info(
            "ShopperNotificationHandler",
            &format!(
                "Pedido confirmado correctamente. Código: {}",
                event.order_code
            ),
            Some(event.metadata.correlation_id),
            Some(context),
        );

        self.processed_events
            .mark_processed(event.metadata.event_id)
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MedicationId, Money, OrderCode, SessionId};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// 出力回数だけを数えるテスト用ロガー
    struct CountingLogger {
        info_count: AtomicU32,
    }

    impl CountingLogger {
        fn new() -> Self {
            Self {
                info_count: AtomicU32::new(0),
            }
        }
    }

    impl Logger for CountingLogger {
        fn debug(
            &self,
            _component: &str,
            _message: &str,
            _correlation_id: Option<Uuid>,
            _context: Option<HashMap<String, String>>,
        ) {
        }

        fn info(
            &self,
            _component: &str,
            _message: &str,
            _correlation_id: Option<Uuid>,
            _context: Option<HashMap<String, String>>,
        ) {
            self.info_count.fetch_add(1, Ordering::SeqCst);
        }

        fn warn(
            &self,
            _component: &str,
            _message: &str,
            _correlation_id: Option<Uuid>,
            _context: Option<HashMap<String, String>>,
        ) {
        }

        fn error(
            &self,
            _component: &str,
            _message: &str,
            _correlation_id: Option<Uuid>,
            _context: Option<HashMap<String, String>>,
        ) {
        }
    }

    #[tokio::test]
    async fn test_tracker_marks_and_detects() {
        let tracker = ProcessedEventTracker::new();
        let event_id = Uuid::new_v4();

        assert!(!tracker.is_processed(event_id).await);
        tracker.mark_processed(event_id).await;
        assert!(tracker.is_processed(event_id).await);
    }

    #[tokio::test]
    async fn test_item_added_notification_is_idempotent() {
        let logger = Arc::new(CountingLogger::new());
        let handler = ShopperNotificationHandler::new(logger.clone());

        let event = ItemAddedToCart::new(
            SessionId::new(),
            MedicationId::new("1").unwrap(),
            "Paracetamol 500mg".to_string(),
            2,
            Money::mxn(3500),
        );

        handler.handle(event.clone()).await.unwrap();
        handler.handle(event).await.unwrap();

        // 同一イベントの再配信では通知は1回だけ
        assert_eq!(logger.info_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_order_confirmed_notification() {
        let logger = Arc::new(CountingLogger::new());
        let handler = ShopperNotificationHandler::new(logger.clone());

        let event = OrderConfirmed::new(
            SessionId::new(),
            OrderCode::new("PED-ABC123"),
            Vec::new(),
            Money::mxn(13800),
        );

        handler.handle(event).await.unwrap();
        assert_eq!(logger.info_count.load(Ordering::SeqCst), 1);
    }
}
