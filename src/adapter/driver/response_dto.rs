use crate::application::service::MedicationAvailability;
use crate::domain::model::{Cart, CartLine, OrderSummary, QuantityStepper};
use serde::Serialize;

/// セッション開始用のレスポンスDTO
#[derive(Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

/// カート明細用のレスポンスDTO
/// ステッパーの増減可否も含めて返し、表示面が無効化に使えるようにする
#[derive(Serialize)]
pub struct CartLineResponse {
    pub medication_id: String,
    pub display_name: String,
    pub quantity: u32,
    pub unit_price_amount: i64,
    pub unit_price_formatted: String,
    pub subtotal_amount: i64,
    pub subtotal_formatted: String,
    pub currency: String,
    pub max_quantity: u32,
    pub can_increment: bool,
    pub can_decrement: bool,
}

impl CartLineResponse {
    /// ドメインオブジェクトからCartLineResponseを作成
    ///
    /// # Arguments
    /// * `line` - カート明細
    /// * `fallback_max_quantity` - 在庫上限が未拘束の場合のステッパー上限
    pub fn from_line(line: &CartLine, fallback_max_quantity: u32) -> Self {
        let max_quantity = line
            .available_stock_at_bind()
            .unwrap_or(fallback_max_quantity);
        let stepper = QuantityStepper::with_unit_minimum(line.quantity(), max_quantity);

        Self {
            medication_id: line.medication_id().to_string(),
            display_name: line.display_name().to_string(),
            quantity: line.quantity(),
            unit_price_amount: line.unit_price().amount(),
            unit_price_formatted: line.unit_price().formatted(),
            subtotal_amount: line.subtotal().amount(),
            subtotal_formatted: line.subtotal().formatted(),
            currency: line.unit_price().currency(),
            max_quantity,
            can_increment: stepper.can_increment(),
            can_decrement: stepper.can_decrement(),
        }
    }
}

/// カート表示用のレスポンスDTO
#[derive(Serialize)]
pub struct CartResponse {
    pub session_id: String,
    pub lines: Vec<CartLineResponse>,
    pub grand_total_amount: i64,
    pub grand_total_formatted: String,
    pub currency: String,
}

impl CartResponse {
    /// ドメインオブジェクトからCartResponseを作成
    pub fn from_cart(cart: &Cart, fallback_max_quantity: u32) -> Self {
        let grand_total = cart.grand_total();
        Self {
            session_id: cart.session_id().to_string(),
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineResponse::from_line(line, fallback_max_quantity))
                .collect(),
            grand_total_amount: grand_total.amount(),
            grand_total_formatted: grand_total.formatted(),
            currency: grand_total.currency(),
        }
    }
}

/// 医薬品表示用のレスポンスDTO
#[derive(Serialize)]
pub struct MedicationResponse {
    pub medication_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub list_price_amount: i64,
    pub list_price_formatted: String,
    pub discount_price_amount: Option<i64>,
    pub discount_price_formatted: Option<String>,
    pub effective_price_amount: i64,
    pub effective_price_formatted: String,
    pub discount_percent: Option<u32>,
    pub currency: String,
    pub stock: u32,
    pub remaining_stock: u32,
    pub stock_status: String,
}

impl MedicationResponse {
    /// 読み取りモデルからMedicationResponseを作成
    ///
    /// # Arguments
    /// * `availability` - カタログ項目と残余在庫の組
    /// * `low_stock_threshold` - 在庫状況区分の閾値
    pub fn from_availability(
        availability: &MedicationAvailability,
        low_stock_threshold: u32,
    ) -> Self {
        let item = &availability.item;
        Self {
            medication_id: item.medication_id().to_string(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            category: item.category().to_string(),
            list_price_amount: item.list_price().amount(),
            list_price_formatted: item.list_price().formatted(),
            discount_price_amount: item.discount_price().map(|price| price.amount()),
            discount_price_formatted: item.discount_price().map(|price| price.formatted()),
            effective_price_amount: item.effective_price().amount(),
            effective_price_formatted: item.effective_price().formatted(),
            discount_percent: item.discount_percent(),
            currency: item.effective_price().currency(),
            stock: item.stock(),
            remaining_stock: availability.remaining_stock,
            stock_status: item.stock_status(low_stock_threshold).to_string(),
        }
    }
}

/// 注文明細用のレスポンスDTO
#[derive(Serialize)]
pub struct OrderLineResponse {
    pub medication_id: String,
    pub display_name: String,
    pub quantity: u32,
    pub unit_price_amount: i64,
    pub unit_price_formatted: String,
    pub subtotal_amount: i64,
    pub subtotal_formatted: String,
    pub currency: String,
}

/// 注文サマリー用のレスポンスDTO
#[derive(Serialize)]
pub struct OrderSummaryResponse {
    pub order_code: String,
    pub lines: Vec<OrderLineResponse>,
    pub grand_total_amount: i64,
    pub grand_total_formatted: String,
    pub currency: String,
}

impl OrderSummaryResponse {
    /// ドメインオブジェクトからOrderSummaryResponseを作成
    pub fn from_summary(summary: &OrderSummary) -> Self {
        Self {
            order_code: summary.order_code().to_string(),
            lines: summary
                .lines()
                .iter()
                .map(|line| OrderLineResponse {
                    medication_id: line.medication_id().to_string(),
                    display_name: line.display_name().to_string(),
                    quantity: line.quantity(),
                    unit_price_amount: line.unit_price().amount(),
                    unit_price_formatted: line.unit_price().formatted(),
                    subtotal_amount: line.subtotal().amount(),
                    subtotal_formatted: line.subtotal().formatted(),
                    currency: line.unit_price().currency(),
                })
                .collect(),
            grand_total_amount: summary.grand_total().amount(),
            grand_total_formatted: summary.grand_total().formatted(),
            currency: summary.grand_total().currency(),
        }
    }
}
