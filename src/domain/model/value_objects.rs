use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// 買い物セッションの一意識別子
/// カートの所有スコープは1つのセッション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// 新しい一意のSessionIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから SessionId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列からSessionIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// 医薬品の識別子
/// カタログ側が発行する不透明な文字列キー
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MedicationId(String);

impl MedicationId {
    /// 文字列からMedicationIdを作成
    /// 空の識別子は許可しない
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "医薬品IDは空にできません".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// 内部の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MedicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 注文コード
/// 確定時に外部のコード生成器から払い出される人間可読な識別子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCode(String);

impl OrderCode {
    /// 文字列からOrderCodeを作成
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// 内部の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// メキシコペソ
    #[allow(clippy::upper_case_acronyms)]
    MXN,
}

/// 金額を表す値オブジェクト
/// センタボ（1/100ペソ）単位の整数で保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// 金額と通貨から作成
    pub fn new(amount: i64, currency: String) -> Result<Self, DomainError> {
        let currency = match currency.as_str() {
            "MXN" => Currency::MXN,
            _ => {
                return Err(DomainError::InvalidValue(format!(
                    "サポートされていない通貨: {}",
                    currency
                )))
            }
        };
        Ok(Self { amount, currency })
    }

    /// メキシコペソの金額を作成（センタボ単位）
    pub fn mxn(amount: i64) -> Self {
        Self {
            amount,
            currency: Currency::MXN,
        }
    }

    /// 金額を取得（センタボ単位）
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// 通貨を文字列として取得
    pub fn currency(&self) -> String {
        match self.currency {
            Currency::MXN => "MXN".to_string(),
        }
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch);
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// 金額を乗算
    pub fn multiply(&self, factor: u32) -> Money {
        Money {
            amount: self.amount * factor as i64,
            currency: self.currency,
        }
    }

    /// 小数点以下2桁の固定小数点表記（例: "35.00"）
    pub fn formatted(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// カート明細を表す値オブジェクト
/// 1つの医薬品に対する数量のコミットメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    medication_id: MedicationId,
    display_name: String,
    unit_price: Money,
    quantity: u32,
    available_stock_at_bind: Option<u32>,
}

impl CartLine {
    /// 新しいカート明細を作成
    /// 数量は1以上、単価は非負である必要がある
    pub fn new(
        medication_id: MedicationId,
        display_name: String,
        unit_price: Money,
        quantity: u32,
        available_stock_at_bind: Option<u32>,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        if unit_price.amount() < 0 {
            return Err(DomainError::InvalidValue(
                "単価は負にできません".to_string(),
            ));
        }
        Ok(Self {
            medication_id,
            display_name,
            unit_price,
            quantity,
            available_stock_at_bind,
        })
    }

    /// 医薬品IDを取得
    pub fn medication_id(&self) -> &MedicationId {
        &self.medication_id
    }

    /// 表示名を取得（追加時点の名称を保持し、再取得しない）
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// 単価を取得
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// 数量を取得
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// 直近の変更時点で把握していた在庫上限
    /// 参考値であり、在庫の真実の源ではない
    pub fn available_stock_at_bind(&self) -> Option<u32> {
        self.available_stock_at_bind
    }

    /// 小計を計算（単価 × 数量）
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// 数量を増加させる（同じ医薬品を追加する場合）
    pub fn increase_quantity(&mut self, additional_quantity: u32) -> Result<(), DomainError> {
        if additional_quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        self.quantity = self
            .quantity
            .checked_add(additional_quantity)
            .ok_or(DomainError::InvalidQuantity)?;
        Ok(())
    }

    /// 数量を置き換える（累積ではなく置換）
    /// 数量0は集約側で削除として扱うため、ここでは拒否する
    pub fn replace_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        self.quantity = quantity;
        Ok(())
    }

    /// 単価を更新する（追加操作で触れられた時点の価格に固定し直す）
    pub fn update_unit_price(&mut self, unit_price: Money) -> Result<(), DomainError> {
        if unit_price.amount() < 0 {
            return Err(DomainError::InvalidValue(
                "単価は負にできません".to_string(),
            ));
        }
        self.unit_price = unit_price;
        Ok(())
    }

    /// 在庫上限を拘束し直す
    pub fn bind_stock(&mut self, available_stock: Option<u32>) {
        self.available_stock_at_bind = available_stock;
    }
}
