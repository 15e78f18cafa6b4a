pub mod cart_query_service;
pub mod catalog_query_service;

pub use cart_query_service::CartQueryService;
pub use catalog_query_service::{CatalogQueryService, MedicationAvailability};

use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::event::{DomainEvent, ItemAddedToCart, OrderConfirmed};
use crate::domain::model::{Cart, MedicationId, OrderSummary, SessionId};
use crate::domain::port::{CartRepository, CatalogProvider, EventBus, OrderCodeGenerator};
use std::sync::Arc;
use uuid::Uuid;

/// カートアプリケーションサービス
/// セッションのカートに対する変更操作と注文確定を調停する
pub struct CartApplicationService<CR>
where
    CR: CartRepository,
{
    cart_repository: CR,
    catalog_provider: Arc<dyn CatalogProvider>,
    order_code_generator: Arc<dyn OrderCodeGenerator>,
    event_bus: Arc<dyn EventBus>,
}

impl<CR> CartApplicationService<CR>
where
    CR: CartRepository,
{
    /// 新しいアプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `cart_repository` - セッション単位のカートストア
    /// * `catalog_provider` - 読み取り専用カタログ
    /// * `order_code_generator` - 注文コード生成器
    /// * `event_bus` - イベントバス
    pub fn new(
        cart_repository: CR,
        catalog_provider: Arc<dyn CatalogProvider>,
        order_code_generator: Arc<dyn OrderCodeGenerator>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            cart_repository,
            catalog_provider,
            order_code_generator,
            event_bus,
        }
    }

    /// イベントに相関IDを設定するヘルパー関数
    fn set_correlation_id_to_event(
        &self,
        mut event: DomainEvent,
        correlation_id: Uuid,
    ) -> DomainEvent {
        match &mut event {
            DomainEvent::ItemAddedToCart(ref mut e) => e.metadata.correlation_id = correlation_id,
            DomainEvent::OrderConfirmed(ref mut e) => e.metadata.correlation_id = correlation_id,
        }
        event
    }

    /// セッションのカートを取得する
    /// 開始されていないセッションへのアクセスは前提条件違反として扱う
    async fn load_cart(&self, session_id: SessionId) -> Result<Cart, ApplicationError> {
        self.cart_repository
            .find_by_session(session_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::SessionNotInitialized(format!(
                    "セッションが開始されていません: {}",
                    session_id
                ))
            })
    }

    /// 新しい買い物セッションを開始し、空のカートを作成する
    ///
    /// # Returns
    /// * `Ok(SessionId)` - 開始されたセッションのID
    /// * `Err(ApplicationError)` - 開始失敗
    pub async fn start_session(&self) -> Result<SessionId, ApplicationError> {
        let session_id = self.cart_repository.next_identity();
        let cart = Cart::new(session_id);
        self.cart_repository.save(&cart).await?;
        Ok(session_id)
    }

    /// 医薬品をカートに追加
    /// カタログから実効単価と在庫数を読み取り、拘束してストアに渡す
    ///
    /// # Arguments
    /// * `session_id` - セッションID
    /// * `medication_id` - 医薬品ID
    /// * `quantity` - 追加する数量
    ///
    /// # Returns
    /// * `Ok(())` - 追加成功
    /// * `Err(ApplicationError)` - 在庫不足・医薬品なしなどの失敗
    pub async fn add_to_cart(
        &self,
        session_id: SessionId,
        medication_id: MedicationId,
        quantity: u32,
    ) -> Result<(), ApplicationError> {
        let mut cart = self.load_cart(session_id).await?;

        let item = self
            .catalog_provider
            .find_by_id(&medication_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!(
                    "医薬品が見つかりません: {}",
                    medication_id
                ))
            })?;

        // 表示面と同じ事前チェック: 要求数量だけで在庫を超える場合は
        // ストアに渡す前に拒否する（在庫切れ項目もここで弾かれる）
        if quantity > item.stock() {
            return Err(ApplicationError::DomainError(
                DomainError::InsufficientStock,
            ));
        }

        cart.add_item(
            item.medication_id().clone(),
            item.name().to_string(),
            item.effective_price(),
            quantity,
            Some(item.stock()),
        )?;
        self.cart_repository.save(&cart).await?;

        let correlation_id = Uuid::new_v4();
        let event = ItemAddedToCart::new(
            session_id,
            item.medication_id().clone(),
            item.name().to_string(),
            quantity,
            item.effective_price(),
        );
        let event_with_correlation =
            self.set_correlation_id_to_event(DomainEvent::ItemAddedToCart(event), correlation_id);

        self.event_bus
            .publish(event_with_correlation)
            .await
            .map_err(|e| ApplicationError::EventPublishingFailed(e.to_string()))?;

        Ok(())
    }

    /// 明細の数量を置き換える
    /// ストア側は在庫を見ないため、拘束時在庫との突き合わせは
    /// ここ（呼び出し側）で行う
    ///
    /// # Arguments
    /// * `session_id` - セッションID
    /// * `medication_id` - 医薬品ID
    /// * `quantity` - 新しい数量（0は削除と同義）
    pub async fn set_item_quantity(
        &self,
        session_id: SessionId,
        medication_id: MedicationId,
        quantity: u32,
    ) -> Result<(), ApplicationError> {
        let mut cart = self.load_cart(session_id).await?;

        if quantity > 0 {
            if let Some(line) = cart
                .lines()
                .iter()
                .find(|line| line.medication_id() == &medication_id)
            {
                if let Some(stock) = line.available_stock_at_bind() {
                    if stock > 0 && quantity > stock {
                        return Err(ApplicationError::DomainError(
                            DomainError::InsufficientStock,
                        ));
                    }
                }
            }
        }

        cart.set_quantity(&medication_id, quantity)?;
        self.cart_repository.save(&cart).await?;
        Ok(())
    }

    /// 明細を削除する
    /// 存在しない医薬品IDでも成功する（冪等）
    pub async fn remove_from_cart(
        &self,
        session_id: SessionId,
        medication_id: MedicationId,
    ) -> Result<(), ApplicationError> {
        let mut cart = self.load_cart(session_id).await?;
        cart.remove_item(&medication_id);
        self.cart_repository.save(&cart).await?;
        Ok(())
    }

    /// カートを空にする
    pub async fn clear_cart(&self, session_id: SessionId) -> Result<(), ApplicationError> {
        let mut cart = self.load_cart(session_id).await?;
        cart.clear();
        self.cart_repository.save(&cart).await?;
        Ok(())
    }

    /// 注文を確定し、注文サマリーを引き渡してカートを空にする
    ///
    /// # Returns
    /// * `Ok(OrderSummary)` - 確定された注文のスナップショット
    /// * `Err(ApplicationError)` - 空カート・在庫不足などの失敗
    pub async fn checkout(&self, session_id: SessionId) -> Result<OrderSummary, ApplicationError> {
        let mut cart = self.load_cart(session_id).await?;

        let order_code = self.order_code_generator.next_code();
        let summary = cart.checkout(order_code)?;
        self.cart_repository.save(&cart).await?;

        let correlation_id = Uuid::new_v4();
        let event = OrderConfirmed::new(
            session_id,
            summary.order_code().clone(),
            summary.lines().to_vec(),
            summary.grand_total(),
        );
        let event_with_correlation =
            self.set_correlation_id_to_event(DomainEvent::OrderConfirmed(event), correlation_id);

        self.event_bus
            .publish(event_with_correlation)
            .await
            .map_err(|e| ApplicationError::EventPublishingFailed(e.to_string()))?;

        Ok(summary)
    }
}
