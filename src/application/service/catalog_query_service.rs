use crate::application::ApplicationError;
use crate::domain::model::{Cart, CatalogItem, MedicationId, SessionId};
use crate::domain::port::{CartRepository, CatalogProvider};
use crate::domain::service::remaining_stock_for;
use std::sync::Arc;

/// カタログ照会の読み取りモデル
/// カタログ項目と、現在のカートを差し引いた残余在庫の組
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationAvailability {
    pub item: CatalogItem,
    pub remaining_stock: u32,
}

/// カタログクエリサービス
/// カタログスナップショットをカート状態と照合して提供する。
/// 残余在庫は問い合わせのたびに再計算され、キャッシュされない。
pub struct CatalogQueryService {
    catalog_provider: Arc<dyn CatalogProvider>,
    cart_repository: Arc<dyn CartRepository>,
}

impl CatalogQueryService {
    /// 新しいカタログクエリサービスを作成
    ///
    /// # Arguments
    /// * `catalog_provider` - 読み取り専用カタログ
    /// * `cart_repository` - セッション単位のカートストア
    pub fn new(
        catalog_provider: Arc<dyn CatalogProvider>,
        cart_repository: Arc<dyn CartRepository>,
    ) -> Self {
        Self {
            catalog_provider,
            cart_repository,
        }
    }

    /// セッションのカートを取得する（セッション指定なし・未開始はNone）
    async fn load_cart(&self, session_id: Option<SessionId>) -> Result<Option<Cart>, ApplicationError> {
        match session_id {
            Some(session_id) => Ok(self.cart_repository.find_by_session(session_id).await?),
            None => Ok(None),
        }
    }

    /// すべての医薬品を残余在庫つきで取得
    ///
    /// # Arguments
    /// * `session_id` - 残余在庫の計算に使うセッション（任意）
    pub async fn list_medications(
        &self,
        session_id: Option<SessionId>,
    ) -> Result<Vec<MedicationAvailability>, ApplicationError> {
        let cart = self.load_cart(session_id).await?;
        let items = self.catalog_provider.find_all().await?;
        Ok(Self::with_remaining_stock(items, cart.as_ref()))
    }

    /// 部分一致検索の結果を残余在庫つきで取得
    pub async fn search_medications(
        &self,
        query: &str,
        session_id: Option<SessionId>,
    ) -> Result<Vec<MedicationAvailability>, ApplicationError> {
        let cart = self.load_cart(session_id).await?;
        let items = self.catalog_provider.search(query).await?;
        Ok(Self::with_remaining_stock(items, cart.as_ref()))
    }

    /// 1件の医薬品を残余在庫つきで取得
    ///
    /// # Returns
    /// * `Ok(Some(MedicationAvailability))` - 項目が見つかった
    /// * `Ok(None)` - 項目が存在しない
    pub async fn get_medication(
        &self,
        medication_id: &MedicationId,
        session_id: Option<SessionId>,
    ) -> Result<Option<MedicationAvailability>, ApplicationError> {
        let cart = self.load_cart(session_id).await?;
        let item = self.catalog_provider.find_by_id(medication_id).await?;
        Ok(item.map(|item| {
            let remaining_stock = remaining_stock_for(&item, cart.as_ref());
            MedicationAvailability {
                item,
                remaining_stock,
            }
        }))
    }

    fn with_remaining_stock(
        items: Vec<CatalogItem>,
        cart: Option<&Cart>,
    ) -> Vec<MedicationAvailability> {
        items
            .into_iter()
            .map(|item| {
                let remaining_stock = remaining_stock_for(&item, cart);
                MedicationAvailability {
                    item,
                    remaining_stock,
                }
            })
            .collect()
    }
}
