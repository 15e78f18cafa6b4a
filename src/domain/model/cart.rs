use crate::domain::error::DomainError;
use crate::domain::model::{CartLine, MedicationId, Money, OrderCode, SessionId};
use serde::{Deserialize, Serialize};

/// カート集約
/// 買い物客の選択中の明細と数量を管理し、在庫との整合を強制する
///
/// 操作後に常に成立する不変条件:
/// - すべての明細の数量は1以上（0になる明細は削除される）
/// - 明細は医薬品IDごとに高々1つで、挿入順を保持する
/// - 拘束時在庫が正で把握されている場合、数量はそれを超えない
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    session_id: SessionId,
    lines: Vec<CartLine>,
}

impl Cart {
    /// 新しい空のカートを作成
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            lines: Vec::new(),
        }
    }

    /// セッションIDを取得
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// 明細のリストを取得（挿入順）
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// カートが空かどうか
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 指定した医薬品の現在数量を取得（明細がなければ0）
    pub fn quantity_of(&self, medication_id: &MedicationId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.medication_id() == medication_id)
            .map(|line| line.quantity())
            .unwrap_or(0)
    }

    /// 医薬品をカートに追加
    /// 同じ医薬品が既に存在する場合は数量を累積する
    ///
    /// 在庫チェックはマージ後の合計数量に対して行う。拘束時在庫が正で、
    /// 合計がそれを超える場合は操作全体を拒否し、カートは変更されない。
    ///
    /// # Arguments
    /// * `medication_id` - 医薬品ID
    /// * `display_name` - 追加時点の表示名
    /// * `unit_price` - 追加時点の実効単価（割引後）
    /// * `quantity` - 追加する数量（1以上）
    /// * `available_stock` - 把握している在庫数（不明ならNone）
    pub fn add_item(
        &mut self,
        medication_id: MedicationId,
        display_name: String,
        unit_price: Money,
        quantity: u32,
        available_stock: Option<u32>,
    ) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        if unit_price.amount() < 0 {
            return Err(DomainError::InvalidValue(
                "単価は負にできません".to_string(),
            ));
        }

        let combined = self
            .quantity_of(&medication_id)
            .checked_add(quantity)
            .ok_or(DomainError::InvalidQuantity)?;

        // 在庫0は「上限不明」として扱い、チェックしない
        if let Some(stock) = available_stock {
            if stock > 0 && combined > stock {
                return Err(DomainError::InsufficientStock);
            }
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.medication_id() == &medication_id)
        {
            line.increase_quantity(quantity)?;
            line.update_unit_price(unit_price)?;
            line.bind_stock(available_stock);
        } else {
            let line = CartLine::new(
                medication_id,
                display_name,
                unit_price,
                quantity,
                available_stock,
            )?;
            self.lines.push(line);
        }

        Ok(())
    }

    /// 明細の数量を置き換える（累積ではなく置換）
    /// 数量0は削除と同義。存在しない医薬品IDは何もしない。
    ///
    /// ここでは在庫チェックを行わない。上限の検証は呼び出し側
    /// （数量ステッパーを束ねる表示面）の責務であり、この非対称性は
    /// `add_item` との仕様上の差異として維持する。
    pub fn set_quantity(
        &mut self,
        medication_id: &MedicationId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        if quantity == 0 {
            self.remove_item(medication_id);
            return Ok(());
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.medication_id() == medication_id)
        {
            line.replace_quantity(quantity)?;
        }
        Ok(())
    }

    /// 明細を削除する
    /// 存在しない医薬品IDは何もしない（冪等）
    pub fn remove_item(&mut self, medication_id: &MedicationId) {
        self.lines
            .retain(|line| line.medication_id() != medication_id);
    }

    /// すべての明細を削除する
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// 合計金額を計算
    /// 全明細の小計の総和。保持せず、読み取りのたびに再計算する。
    pub fn grand_total(&self) -> Money {
        self.lines
            .iter()
            .map(|line| line.subtotal())
            .fold(Money::mxn(0), |acc, amount| acc.add(&amount).unwrap_or(acc))
    }

    /// 注文を確定し、カートの内容を不変の注文サマリーへ引き渡す
    /// 事前条件:
    /// - 明細が1つ以上
    /// - 各明細の数量が拘束時在庫を超えていない
    ///
    /// 成功時はカートを空にする。失敗時はカートを変更しない。
    pub fn checkout(&mut self, order_code: OrderCode) -> Result<OrderSummary, DomainError> {
        if self.lines.is_empty() {
            return Err(DomainError::EmptyCartCheckout);
        }

        // 確定前に各明細を拘束時在庫と突き合わせる
        for line in &self.lines {
            if let Some(stock) = line.available_stock_at_bind() {
                if stock > 0 && line.quantity() > stock {
                    return Err(DomainError::InsufficientStock);
                }
            }
        }

        let summary = OrderSummary::new(order_code, self.lines.clone(), self.grand_total());
        self.lines.clear();
        Ok(summary)
    }
}

/// 注文サマリー
/// 確定時点のカートのスナップショット。作成後は変更されない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    order_code: OrderCode,
    lines: Vec<CartLine>,
    grand_total: Money,
}

impl OrderSummary {
    /// 新しい注文サマリーを作成
    pub fn new(order_code: OrderCode, lines: Vec<CartLine>, grand_total: Money) -> Self {
        Self {
            order_code,
            lines,
            grand_total,
        }
    }

    /// 注文コードを取得
    pub fn order_code(&self) -> &OrderCode {
        &self.order_code
    }

    /// 明細スナップショットを取得
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// 合計金額を取得
    pub fn grand_total(&self) -> Money {
        self.grand_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med_id(id: &str) -> MedicationId {
        MedicationId::new(id).unwrap()
    }

    fn add_paracetamol(cart: &mut Cart, quantity: u32) -> Result<(), DomainError> {
        cart.add_item(
            med_id("p1"),
            "Paracetamol 500mg".to_string(),
            Money::mxn(3500),
            quantity,
            Some(150),
        )
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new(SessionId::new());
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total().amount(), 0);
    }

    #[test]
    fn test_add_item_creates_line() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
        assert_eq!(cart.lines()[0].subtotal().amount(), 7000);
        assert_eq!(cart.grand_total().amount(), 7000);
    }

    #[test]
    fn test_add_same_medication_accumulates_quantity() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        add_paracetamol(&mut cart, 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 5);
        assert_eq!(cart.lines()[0].subtotal().amount(), 17500);
    }

    #[test]
    fn test_add_with_zero_quantity_fails() {
        let mut cart = Cart::new(SessionId::new());
        assert_eq!(
            add_paracetamol(&mut cart, 0),
            Err(DomainError::InvalidQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_capacity_checked_against_combined_quantity() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        add_paracetamol(&mut cart, 3).unwrap();

        // 5 + 150 > 150 のため拒否され、カートは変更されない
        let before = cart.clone();
        assert_eq!(
            add_paracetamol(&mut cart, 150),
            Err(DomainError::InsufficientStock)
        );
        assert_eq!(cart, before);
        assert_eq!(cart.lines()[0].quantity(), 5);
        assert_eq!(cart.grand_total().amount(), 17500);
    }

    #[test]
    fn test_capacity_allows_exactly_full_stock() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 100).unwrap();
        add_paracetamol(&mut cart, 50).unwrap();
        assert_eq!(cart.lines()[0].quantity(), 150);
    }

    #[test]
    fn test_stock_of_zero_is_treated_as_unknown() {
        let mut cart = Cart::new(SessionId::new());
        let result = cart.add_item(
            med_id("p1"),
            "Paracetamol 500mg".to_string(),
            Money::mxn(3500),
            2,
            Some(0),
        );
        assert!(result.is_ok());
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_add_without_stock_skips_capacity_check() {
        let mut cart = Cart::new(SessionId::new());
        cart.add_item(
            med_id("p1"),
            "Paracetamol 500mg".to_string(),
            Money::mxn(3500),
            1000,
            None,
        )
        .unwrap();
        assert_eq!(cart.lines()[0].quantity(), 1000);
    }

    #[test]
    fn test_merge_refreshes_unit_price_and_stock_bind() {
        let mut cart = Cart::new(SessionId::new());
        cart.add_item(
            med_id("p1"),
            "Paracetamol 500mg".to_string(),
            Money::mxn(4500),
            2,
            Some(150),
        )
        .unwrap();
        cart.add_item(
            med_id("p1"),
            "Paracetamol 500mg".to_string(),
            Money::mxn(3500),
            1,
            Some(140),
        )
        .unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.unit_price().amount(), 3500);
        assert_eq!(line.available_stock_at_bind(), Some(140));
        assert_eq!(line.subtotal().amount(), 3 * 3500);
    }

    #[test]
    fn test_set_quantity_replaces_instead_of_accumulating() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        cart.set_quantity(&med_id("p1"), 7).unwrap();

        assert_eq!(cart.lines()[0].quantity(), 7);
        assert_eq!(cart.grand_total().amount(), 7 * 3500);
    }

    #[test]
    fn test_set_quantity_performs_no_stock_check() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();

        // 上限検証は呼び出し側の責務のため、拘束時在庫を超えても置換される
        cart.set_quantity(&med_id("p1"), 999).unwrap();
        assert_eq!(cart.lines()[0].quantity(), 999);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 5).unwrap();
        cart.set_quantity(&med_id("p1"), 0).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.grand_total().amount(), 0);
    }

    #[test]
    fn test_set_quantity_for_absent_medication_is_noop() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        cart.set_quantity(&med_id("desconocido"), 10).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();

        cart.remove_item(&med_id("p1"));
        assert!(cart.is_empty());

        // 既に存在しないIDの削除は何もしない
        cart.remove_item(&med_id("p1"));
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total().amount(), 0);
    }

    #[test]
    fn test_grand_total_over_multiple_lines() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        cart.add_item(
            med_id("p2"),
            "Ibuprofeno 400mg".to_string(),
            Money::mxn(6800),
            1,
            Some(8),
        )
        .unwrap();

        // 2×35.00 + 1×68.00 = 138.00
        assert_eq!(cart.grand_total().amount(), 13800);
    }

    #[test]
    fn test_lines_preserve_insertion_order() {
        let mut cart = Cart::new(SessionId::new());
        cart.add_item(
            med_id("p2"),
            "Ibuprofeno 400mg".to_string(),
            Money::mxn(6800),
            1,
            None,
        )
        .unwrap();
        add_paracetamol(&mut cart, 1).unwrap();

        assert_eq!(cart.lines()[0].medication_id().as_str(), "p2");
        assert_eq!(cart.lines()[1].medication_id().as_str(), "p1");
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.grand_total().amount(), 0);
    }

    #[test]
    fn test_checkout_of_empty_cart_fails() {
        let mut cart = Cart::new(SessionId::new());
        let result = cart.checkout(OrderCode::new("PED-ABC123"));
        assert_eq!(result.unwrap_err(), DomainError::EmptyCartCheckout);
    }

    #[test]
    fn test_checkout_snapshots_and_clears() {
        let mut cart = Cart::new(SessionId::new());
        add_paracetamol(&mut cart, 2).unwrap();
        cart.add_item(
            med_id("p2"),
            "Ibuprofeno 400mg".to_string(),
            Money::mxn(6800),
            1,
            Some(8),
        )
        .unwrap();

        let summary = cart.checkout(OrderCode::new("PED-ABC123")).unwrap();

        assert_eq!(summary.order_code().as_str(), "PED-ABC123");
        assert_eq!(summary.lines().len(), 2);
        assert_eq!(summary.grand_total().amount(), 13800);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_rejects_line_over_bound_stock() {
        let mut cart = Cart::new(SessionId::new());
        cart.add_item(
            med_id("p2"),
            "Ibuprofeno 400mg".to_string(),
            Money::mxn(6800),
            3,
            Some(8),
        )
        .unwrap();
        // ステッパー外の経路で上限超過になった場合も確定時に検出する
        cart.set_quantity(&med_id("p2"), 20).unwrap();

        let result = cart.checkout(OrderCode::new("PED-ABC123"));
        assert_eq!(result.unwrap_err(), DomainError::InsufficientStock);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_scenario_from_store_contract() {
        let mut cart = Cart::new(SessionId::new());

        add_paracetamol(&mut cart, 2).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.grand_total().amount(), 7000);

        add_paracetamol(&mut cart, 3).unwrap();
        assert_eq!(cart.lines()[0].quantity(), 5);
        assert_eq!(cart.lines()[0].subtotal().amount(), 17500);

        assert!(add_paracetamol(&mut cart, 150).is_err());
        assert_eq!(cart.lines()[0].quantity(), 5);
        assert_eq!(cart.lines()[0].subtotal().amount(), 17500);

        cart.set_quantity(&med_id("p1"), 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total().amount(), 0);
    }
}
