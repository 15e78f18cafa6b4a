use crate::application::ApplicationError;
use crate::domain::model::{Cart, SessionId};
use crate::domain::port::CartRepository;
use std::sync::Arc;

/// カートクエリサービス
/// 読み取り専用のカート操作を提供する
pub struct CartQueryService {
    cart_repository: Arc<dyn CartRepository>,
}

impl CartQueryService {
    /// 新しいカートクエリサービスを作成
    ///
    /// # Arguments
    /// * `cart_repository` - セッション単位のカートストア
    pub fn new(cart_repository: Arc<dyn CartRepository>) -> Self {
        Self { cart_repository }
    }

    /// セッションのカートを取得
    ///
    /// # Returns
    /// * `Ok(Cart)` - 現在のカート
    /// * `Err(ApplicationError::SessionNotInitialized)` - セッション未開始
    pub async fn get_cart(&self, session_id: SessionId) -> Result<Cart, ApplicationError> {
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
}
