use crate::domain::model::{MedicationId, Money};
use serde::{Deserialize, Serialize};

use std::fmt;

/// 在庫状況の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    /// 在庫あり
    Available,
    /// 残りわずか
    LowStock,
    /// 在庫切れ
    OutOfStock,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            StockStatus::Available => "available",
            StockStatus::LowStock => "low",
            StockStatus::OutOfStock => "out",
        };
        write!(f, "{}", status_str)
    }
}

/// カタログ項目
/// 外部カタログが読み取り時点で供給する医薬品のスナップショット。
/// コアはこれを変更しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    medication_id: MedicationId,
    name: String,
    description: String,
    category: String,
    list_price: Money,
    discount_price: Option<Money>,
    stock: u32,
}

impl CatalogItem {
    /// 新しいカタログ項目を作成
    pub fn new(
        medication_id: MedicationId,
        name: String,
        description: String,
        category: String,
        list_price: Money,
        discount_price: Option<Money>,
        stock: u32,
    ) -> Self {
        Self {
            medication_id,
            name,
            description,
            category,
            list_price,
            discount_price,
            stock,
        }
    }

    /// 医薬品IDを取得
    pub fn medication_id(&self) -> &MedicationId {
        &self.medication_id
    }

    /// 名称を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 説明を取得
    pub fn description(&self) -> &str {
        &self.description
    }

    /// カテゴリを取得
    pub fn category(&self) -> &str {
        &self.category
    }

    /// 定価を取得
    pub fn list_price(&self) -> Money {
        self.list_price
    }

    /// 割引価格を取得（割引がない場合はNone）
    pub fn discount_price(&self) -> Option<Money> {
        self.discount_price
    }

    /// 実効単価を取得（割引があれば割引後価格）
    /// カートに固定されるのはこの価格
    pub fn effective_price(&self) -> Money {
        self.discount_price.unwrap_or(self.list_price)
    }

    /// 割引率（パーセント、四捨五入）
    pub fn discount_percent(&self) -> Option<u32> {
        let discount = self.discount_price?;
        if self.list_price.amount() <= 0 {
            return None;
        }
        let saved = self.list_price.amount() - discount.amount();
        if saved <= 0 {
            return None;
        }
        Some(((saved * 100 + self.list_price.amount() / 2) / self.list_price.amount()) as u32)
    }

    /// 在庫数を取得
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// 在庫状況を区分する
    ///
    /// # Arguments
    /// * `low_stock_threshold` - この数以下を「残りわずか」とみなす閾値
    pub fn stock_status(&self, low_stock_threshold: u32) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.stock <= low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::Available
        }
    }
}
