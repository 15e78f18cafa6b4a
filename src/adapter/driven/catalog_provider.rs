use crate::domain::model::{CatalogItem, MedicationId, Money};
use crate::domain::port::{CatalogProvider, RepositoryError};
use async_trait::async_trait;

/// インメモリカタログプロバイダー
/// 固定の医薬品カタログを供給する読み取り専用アダプター。
/// 実運用では外部カタログサービスへの問い合わせに置き換わる。
#[derive(Clone)]
pub struct InMemoryCatalogProvider {
    items: Vec<CatalogItem>,
}

impl InMemoryCatalogProvider {
    /// 任意の項目リストからプロバイダーを作成
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// 初期カタログつきでプロバイダーを作成
    pub fn with_seed_catalog() -> Result<Self, RepositoryError> {
        let items = vec![
            CatalogItem::new(
                Self::medication_id("1")?,
                "Paracetamol 500mg".to_string(),
                "Analgésico y antipirético para dolor y fiebre".to_string(),
                "Analgésicos".to_string(),
                Money::mxn(4500),
                Some(Money::mxn(3500)),
                150,
            ),
            CatalogItem::new(
                Self::medication_id("2")?,
                "Ibuprofeno 400mg".to_string(),
                "Antiinflamatorio no esteroideo para dolor e inflamación".to_string(),
                "Antiinflamatorios".to_string(),
                Money::mxn(8500),
                Some(Money::mxn(6800)),
                8,
            ),
            CatalogItem::new(
                Self::medication_id("3")?,
                "Amoxicilina 500mg".to_string(),
                "Antibiótico de amplio espectro".to_string(),
                "Antibióticos".to_string(),
                Money::mxn(12000),
                None,
                0,
            ),
            CatalogItem::new(
                Self::medication_id("4")?,
                "Omeprazol 20mg".to_string(),
                "Inhibidor de bomba de protones para problemas gástricos".to_string(),
                "Gastroenterología".to_string(),
                Money::mxn(9500),
                Some(Money::mxn(7600)),
                45,
            ),
        ];
        Ok(Self::new(items))
    }

    fn medication_id(id: &str) -> Result<MedicationId, RepositoryError> {
        MedicationId::new(id)
            .map_err(|e| RepositoryError::OperationFailed(format!("カタログIDが不正です: {}", e)))
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalogProvider {
    async fn find_by_id(
        &self,
        medication_id: &MedicationId,
    ) -> Result<Option<CatalogItem>, RepositoryError> {
        Ok(self
            .items
            .iter()
            .find(|item| item.medication_id() == medication_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<CatalogItem>, RepositoryError> {
        Ok(self.items.clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, RepositoryError> {
        let query = query.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|item| {
                item.name().to_lowercase().contains(&query)
                    || item.description().to_lowercase().contains(&query)
                    || item.category().to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StockStatus;

    #[tokio::test]
    async fn test_seed_catalog_contains_four_medications() {
        let provider = InMemoryCatalogProvider::with_seed_catalog().unwrap();
        let items = provider.find_all().await.unwrap();
        assert_eq!(items.len(), 4);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let provider = InMemoryCatalogProvider::with_seed_catalog().unwrap();
        let item = provider
            .find_by_id(&MedicationId::new("1").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(item.name(), "Paracetamol 500mg");
        assert_eq!(item.effective_price().amount(), 3500);
        assert_eq!(item.stock(), 150);
    }

    #[tokio::test]
    async fn test_find_by_unknown_id_returns_none() {
        let provider = InMemoryCatalogProvider::with_seed_catalog().unwrap();
        let item = provider
            .find_by_id(&MedicationId::new("999").unwrap())
            .await
            .unwrap();
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_search_matches_name_description_and_category() {
        let provider = InMemoryCatalogProvider::with_seed_catalog().unwrap();

        let by_name = provider.search("ibuprofeno").await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_description = provider.search("antibiótico").await.unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].name(), "Amoxicilina 500mg");

        let by_category = provider.search("gastro").await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name(), "Omeprazol 20mg");
    }

    #[tokio::test]
    async fn test_seed_statuses_match_expected_stock_levels() {
        let provider = InMemoryCatalogProvider::with_seed_catalog().unwrap();
        let items = provider.find_all().await.unwrap();

        let statuses: Vec<StockStatus> =
            items.iter().map(|item| item.stock_status(10)).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::Available,
                StockStatus::LowStock,
                StockStatus::OutOfStock,
                StockStatus::Available,
            ]
        );
    }
}
