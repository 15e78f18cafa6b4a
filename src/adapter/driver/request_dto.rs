use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// カート追加用のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct AddItemRequest {
    pub medication_id: String,
    pub quantity: u32,
}

/// 数量変更用のリクエストDTO
#[derive(Serialize, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

/// 医薬品一覧取得用のクエリパラメータ
#[derive(Deserialize)]
pub struct MedicationsQueryParams {
    /// 部分一致検索の文字列
    pub q: Option<String>,
    /// 残余在庫の計算に使うセッション
    pub session_id: Option<Uuid>,
}

/// 医薬品詳細取得用のクエリパラメータ
#[derive(Deserialize)]
pub struct MedicationDetailQueryParams {
    pub session_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_request_serialization() {
        let request = AddItemRequest {
            medication_id: "1".to_string(),
            quantity: 2,
        };

        let json = serde_json::to_string(&request).unwrap();
        let deserialized: AddItemRequest = serde_json::from_str(&json).unwrap();

        assert!(json.contains("medication_id"));
        assert_eq!(deserialized.quantity, 2);
    }

    #[test]
    fn test_set_quantity_request_deserialization() {
        let request: SetQuantityRequest = serde_json::from_str(r#"{"quantity": 0}"#).unwrap();
        assert_eq!(request.quantity, 0);
    }

    #[test]
    fn test_medications_query_params_are_optional() {
        let params: MedicationsQueryParams = serde_json::from_str("{}").unwrap();
        assert!(params.q.is_none());
        assert!(params.session_id.is_none());
    }
}
