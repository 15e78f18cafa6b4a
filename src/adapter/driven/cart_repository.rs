use crate::domain::model::{Cart, SessionId};
use crate::domain::port::{CartRepository, RepositoryError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// インメモリカートリポジトリ
/// セッションIDごとのカートをプロセス内に保持する。
/// 保管はプロセスのライフサイクルに閉じ、永続化は行わない。
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    carts: Arc<Mutex<HashMap<SessionId, Cart>>>,
}

impl InMemoryCartRepository {
    /// 新しいインメモリカートリポジトリを作成
    pub fn new() -> Self {
        Self {
            carts: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().await;
        carts.insert(cart.session_id(), cart.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let carts = self.carts.lock().await;
        Ok(carts.get(&session_id).cloned())
    }

    async fn remove(&self, session_id: SessionId) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().await;
        carts.remove(&session_id);
        Ok(())
    }

    fn next_identity(&self) -> SessionId {
        SessionId::new()
    }
}
