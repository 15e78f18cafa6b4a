/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 在庫不足（追加後の合計数量が拘束時在庫を超える）
    InsufficientStock,
    /// 無効な数量（例: 0の数量での追加）
    InvalidQuantity,
    /// 空のカートでの注文確定
    EmptyCartCheckout,
    /// 通貨の不一致
    CurrencyMismatch,
    /// 無効な値
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InsufficientStock => write!(f, "Insufficient stock"),
            DomainError::InvalidQuantity => write!(f, "Invalid quantity"),
            DomainError::EmptyCartCheckout => write!(f, "Cannot check out an empty cart"),
            DomainError::CurrencyMismatch => write!(f, "Currency mismatch"),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
