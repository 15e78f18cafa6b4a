// ドメインサービス
// 集約とカタログスナップショットにまたがる照合ロジック

use crate::domain::model::{Cart, CatalogItem};

/// 残余在庫を計算する
/// 残余在庫 = max(在庫数 - カート内数量, 0)
///
/// 表示のたびに再計算され、キャッシュされない。数量ステッパーの上限と
/// `add_item` の在庫引数はこの値を使う。
pub fn remaining_stock(available_stock: u32, quantity_in_cart: u32) -> u32 {
    available_stock.saturating_sub(quantity_in_cart)
}

/// カタログ項目と現在のカートを突き合わせて残余在庫を計算する
///
/// # Arguments
/// * `item` - カタログ項目
/// * `cart` - 現在のカート（セッション未開始ならNone）
pub fn remaining_stock_for(item: &CatalogItem, cart: Option<&Cart>) -> u32 {
    let quantity_in_cart = cart
        .map(|cart| cart.quantity_of(item.medication_id()))
        .unwrap_or(0);
    remaining_stock(item.stock(), quantity_in_cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MedicationId, Money, SessionId};

    fn ibuprofeno() -> CatalogItem {
        CatalogItem::new(
            MedicationId::new("2").unwrap(),
            "Ibuprofeno 400mg".to_string(),
            "Antiinflamatorio no esteroideo".to_string(),
            "Antiinflamatorios".to_string(),
            Money::mxn(8500),
            Some(Money::mxn(6800)),
            8,
        )
    }

    #[test]
    fn test_remaining_stock_subtracts_cart_quantity() {
        assert_eq!(remaining_stock(150, 5), 145);
        assert_eq!(remaining_stock(8, 8), 0);
    }

    #[test]
    fn test_remaining_stock_saturates_at_zero() {
        // setQuantity経路で在庫超過した場合も負にはならない
        assert_eq!(remaining_stock(8, 20), 0);
    }

    #[test]
    fn test_remaining_stock_for_without_cart() {
        let item = ibuprofeno();
        assert_eq!(remaining_stock_for(&item, None), 8);
    }

    #[test]
    fn test_remaining_stock_for_reflects_cart_state() {
        let item = ibuprofeno();
        let mut cart = Cart::new(SessionId::new());
        cart.add_item(
            item.medication_id().clone(),
            item.name().to_string(),
            item.effective_price(),
            3,
            Some(item.stock()),
        )
        .unwrap();

        assert_eq!(remaining_stock_for(&item, Some(&cart)), 5);

        cart.add_item(
            item.medication_id().clone(),
            item.name().to_string(),
            item.effective_price(),
            5,
            Some(item.stock()),
        )
        .unwrap();
        assert_eq!(remaining_stock_for(&item, Some(&cart)), 0);
    }
}
