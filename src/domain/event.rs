use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::model::{CartLine, MedicationId, Money, OrderCode, SessionId};

/// イベントメタデータ
/// 冪等性チェックと相関追跡のための共通属性
#[derive(Debug, Clone, PartialEq)]
pub struct EventMetadata {
    /// イベントの一意識別子
    pub event_id: Uuid,
    /// 一連の処理を貫く相関ID
    pub correlation_id: Uuid,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// 新しいメタデータを作成
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            correlation_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// ドメインイベント列挙型
/// ビジネス上の重要なイベントを表現する
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// 医薬品がカートに追加された
    ItemAddedToCart(ItemAddedToCart),
    /// 注文が確定された
    OrderConfirmed(OrderConfirmed),
}

impl DomainEvent {
    /// イベント種別名を取得
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::ItemAddedToCart(_) => "ItemAddedToCart",
            DomainEvent::OrderConfirmed(_) => "OrderConfirmed",
        }
    }

    /// メタデータを取得
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            DomainEvent::ItemAddedToCart(e) => &e.metadata,
            DomainEvent::OrderConfirmed(e) => &e.metadata,
        }
    }
}

/// カート追加イベント
#[derive(Debug, Clone)]
pub struct ItemAddedToCart {
    /// セッションID
    pub session_id: SessionId,
    /// 医薬品ID
    pub medication_id: MedicationId,
    /// 追加時点の表示名
    pub display_name: String,
    /// 追加された数量
    pub quantity: u32,
    /// 追加時点の実効単価
    pub unit_price: Money,
    /// メタデータ
    pub metadata: EventMetadata,
}

impl ItemAddedToCart {
    /// 新しいカート追加イベントを作成
    pub fn new(
        session_id: SessionId,
        medication_id: MedicationId,
        display_name: String,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            session_id,
            medication_id,
            display_name,
            quantity,
            unit_price,
            metadata: EventMetadata::new(),
        }
    }
}

/// 注文確定イベント
#[derive(Debug, Clone)]
pub struct OrderConfirmed {
    /// セッションID
    pub session_id: SessionId,
    /// 注文コード
    pub order_code: OrderCode,
    /// 確定時点の明細スナップショット
    pub lines: Vec<CartLine>,
    /// 合計金額
    pub grand_total: Money,
    /// メタデータ
    pub metadata: EventMetadata,
}

impl OrderConfirmed {
    /// 新しい注文確定イベントを作成
    pub fn new(
        session_id: SessionId,
        order_code: OrderCode,
        lines: Vec<CartLine>,
        grand_total: Money,
    ) -> Self {
        Self {
            session_id,
            order_code,
            lines,
            grand_total,
            metadata: EventMetadata::new(),
        }
    }
}
