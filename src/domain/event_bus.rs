use crate::domain::event::DomainEvent;
use async_trait::async_trait;

/// イベントハンドラーエラー
#[derive(Debug, Clone, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// イベントハンドラートレイト
/// 特定のイベントタイプを処理するハンドラーを定義
#[async_trait]
pub trait EventHandler<E>: Send + Sync {
    async fn handle(&self, event: E) -> Result<(), HandlerError>;
}

/// 型消去されたイベントハンドラー
/// 異なるイベントタイプのハンドラーを統一的に扱うため
#[async_trait]
pub trait DynEventHandler: Send + Sync {
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError>;
    fn can_handle(&self, event: &DomainEvent) -> bool;
    fn handler_name(&self) -> &str;
}

/// ItemAddedToCart用のハンドラーラッパー
pub struct ItemAddedToCartHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::ItemAddedToCart>,
{
    handler: H,
    name: String,
}

impl<H> ItemAddedToCartHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::ItemAddedToCart>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: "ItemAddedToCartHandler".to_string(),
        }
    }

    pub fn with_name(handler: H, name: String) -> Self {
        Self { handler, name }
    }
}

#[async_trait]
impl<H> DynEventHandler for ItemAddedToCartHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::ItemAddedToCart>,
{
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::ItemAddedToCart(e) => self.handler.handle(e.clone()).await,
            _ => Err(HandlerError::ProcessingFailed(
                "Event type mismatch".to_string(),
            )),
        }
    }

    fn can_handle(&self, event: &DomainEvent) -> bool {
        matches!(event, DomainEvent::ItemAddedToCart(_))
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

/// OrderConfirmed用のハンドラーラッパー
pub struct OrderConfirmedHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::OrderConfirmed>,
{
    handler: H,
    name: String,
}

impl<H> OrderConfirmedHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::OrderConfirmed>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: "OrderConfirmedHandler".to_string(),
        }
    }

    pub fn with_name(handler: H, name: String) -> Self {
        Self { handler, name }
    }
}

#[async_trait]
impl<H> DynEventHandler for OrderConfirmedHandlerWrapper<H>
where
    H: EventHandler<crate::domain::event::OrderConfirmed>,
{
    async fn handle_event(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        match event {
            DomainEvent::OrderConfirmed(e) => self.handler.handle(e.clone()).await,
            _ => Err(HandlerError::ProcessingFailed(
                "Event type mismatch".to_string(),
            )),
        }
    }

    fn can_handle(&self, event: &DomainEvent) -> bool {
        matches!(event, DomainEvent::OrderConfirmed(_))
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}
