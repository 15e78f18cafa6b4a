use crate::domain::event::DomainEvent;
use crate::domain::event_bus::{
    DynEventHandler, EventHandler, ItemAddedToCartHandlerWrapper, OrderConfirmedHandlerWrapper,
};
use crate::domain::port::{EventBus, EventBusError, Logger};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// イベントバスの設定
#[derive(Debug, Clone, Copy)]
pub struct EventBusConfig {
    /// ハンドラー失敗時の最大試行回数
    pub max_attempts: u32,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// インメモリイベントバス
/// 登録されたハンドラーへイベントを同期的に配信する。
/// ハンドラーが失敗した場合は設定された回数まで再試行し、
/// それでも失敗したらログに記録して配信を続行する。
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<Vec<Arc<dyn DynEventHandler>>>>,
    config: EventBusConfig,
    logger: Arc<dyn Logger>,
}

impl InMemoryEventBus {
    /// 新しいイベントバスを作成
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_config(EventBusConfig::default(), logger)
    }

    /// 設定を指定してイベントバスを作成
    pub fn with_config(config: EventBusConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
            config,
            logger,
        }
    }

    /// ItemAddedToCartハンドラーを登録
    pub async fn subscribe_item_added<H>(&self, handler: H) -> Result<(), EventBusError>
    where
        H: EventHandler<crate::domain::event::ItemAddedToCart> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers.push(Arc::new(ItemAddedToCartHandlerWrapper::new(handler)));
        Ok(())
    }

    /// OrderConfirmedハンドラーを登録
    pub async fn subscribe_order_confirmed<H>(&self, handler: H) -> Result<(), EventBusError>
    where
        H: EventHandler<crate::domain::event::OrderConfirmed> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        handlers.push(Arc::new(OrderConfirmedHandlerWrapper::new(handler)));
        Ok(())
    }

    async fn dispatch_with_retry(
        &self,
        handler: &Arc<dyn DynEventHandler>,
        event: &DomainEvent,
    ) {
        let mut last_error = None;
        for _attempt in 1..=self.config.max_attempts {
            match handler.handle_event(event).await {
                Ok(()) => return,
                Err(err) => last_error = Some(err),
            }
        }

        if let Some(err) = last_error {
            let mut context = HashMap::new();
            context.insert("event_type".to_string(), event.event_type().to_string());
            context.insert("handler".to_string(), handler.handler_name().to_string());
            context.insert(
                "attempts".to_string(),
                self.config.max_attempts.to_string(),
            );
            self.logger.error(
                "InMemoryEventBus",
                &format!("Handler failed after retries: {}", err),
                Some(event.metadata().correlation_id),
                Some(context),
            );
        }
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError> {
        let handlers = self.handlers.read().await;
        let matching: Vec<_> = handlers
            .iter()
            .filter(|handler| handler.can_handle(&event))
            .cloned()
            .collect();
        drop(handlers);

        self.logger.info(
            "InMemoryEventBus",
            &format!("Event published: {}", event.event_type()),
            Some(event.metadata().correlation_id),
            None,
        );

        for handler in matching {
            self.dispatch_with_retry(&handler, &event).await;
        }

        Ok(())
    }
}
