use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use uuid::Uuid;

use crate::adapter::config::ServerConfig;
use crate::adapter::driven::InMemoryCartRepository;
use crate::adapter::driver::request_dto::{
    AddItemRequest, MedicationDetailQueryParams, MedicationsQueryParams, SetQuantityRequest,
};
use crate::adapter::driver::response_dto::{
    CartResponse, MedicationResponse, OrderSummaryResponse, StartSessionResponse,
};
use crate::application::service::{CartApplicationService, CartQueryService, CatalogQueryService};
use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::{MedicationId, SessionId};

/// エラーレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

// アプリケーションサービスを含む状態
pub type AppState = AppStateInner;

#[derive(Clone)]
pub struct AppStateInner {
    pub cart_service: Arc<CartApplicationService<InMemoryCartRepository>>,
    pub cart_query_service: Arc<CartQueryService>,
    pub catalog_query_service: Arc<CatalogQueryService>,
    pub config: ServerConfig,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/medications", get(list_medications))
        .route("/medications/:medication_id", get(get_medication))
        .route("/cart/sessions", post(start_session))
        .route("/cart/sessions/:session_id", get(get_cart))
        .route("/cart/sessions/:session_id/items", post(add_item))
        .route("/cart/sessions/:session_id/items", delete(clear_cart))
        .route(
            "/cart/sessions/:session_id/items/:medication_id",
            put(set_quantity),
        )
        .route(
            "/cart/sessions/:session_id/items/:medication_id",
            delete(remove_item),
        )
        .route("/cart/sessions/:session_id/checkout", post(checkout))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pharmacy-cart-management",
        "version": "0.1.0"
    }))
}

// 医薬品一覧・検索エンドポイント
async fn list_medications(
    State(state): State<AppState>,
    Query(params): Query<MedicationsQueryParams>,
) -> Result<Json<Vec<MedicationResponse>>, (StatusCode, Json<ApiError>)> {
    let session_id = params.session_id.map(SessionId::from_uuid);

    let result = match params.q {
        Some(query) => {
            state
                .catalog_query_service
                .search_medications(&query, session_id)
                .await
        }
        None => state.catalog_query_service.list_medications(session_id).await,
    };

    match result {
        Ok(list) => Ok(Json(
            list.iter()
                .map(|availability| {
                    MedicationResponse::from_availability(
                        availability,
                        state.config.low_stock_threshold,
                    )
                })
                .collect(),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 医薬品詳細エンドポイント
async fn get_medication(
    State(state): State<AppState>,
    Path(medication_id): Path<String>,
    Query(params): Query<MedicationDetailQueryParams>,
) -> Result<Json<MedicationResponse>, (StatusCode, Json<ApiError>)> {
    let medication_id = parse_medication_id(&medication_id)?;
    let session_id = params.session_id.map(SessionId::from_uuid);

    match state
        .catalog_query_service
        .get_medication(&medication_id, session_id)
        .await
    {
        Ok(Some(availability)) => Ok(Json(MedicationResponse::from_availability(
            &availability,
            state.config.low_stock_threshold,
        ))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("Medication not found: {}", medication_id),
                code: "MEDICATION_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// セッション開始エンドポイント
async fn start_session(
    State(state): State<AppState>,
) -> Result<Json<StartSessionResponse>, (StatusCode, Json<ApiError>)> {
    match state.cart_service.start_session().await {
        Ok(session_id) => Ok(Json(StartSessionResponse {
            session_id: session_id.to_string(),
        })),
        Err(err) => Err(map_application_error(err)),
    }
}

// カート取得エンドポイント
async fn get_cart(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CartResponse>, (StatusCode, Json<ApiError>)> {
    let session_id = SessionId::from_uuid(session_id);

    match state.cart_query_service.get_cart(session_id).await {
        Ok(cart) => Ok(Json(CartResponse::from_cart(
            &cart,
            state.config.fallback_max_quantity,
        ))),
        Err(err) => Err(map_application_error(err)),
    }
}

// カート追加エンドポイント
async fn add_item(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddItemRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let session_id = SessionId::from_uuid(session_id);
    let medication_id = parse_medication_id(&request.medication_id)?;

    match state
        .cart_service
        .add_to_cart(session_id, medication_id, request.quantity)
        .await
    {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// 数量変更エンドポイント
async fn set_quantity(
    State(state): State<AppState>,
    Path((session_id, medication_id)): Path<(Uuid, String)>,
    Json(request): Json<SetQuantityRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let session_id = SessionId::from_uuid(session_id);
    let medication_id = parse_medication_id(&medication_id)?;

    match state
        .cart_service
        .set_item_quantity(session_id, medication_id, request.quantity)
        .await
    {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// 明細削除エンドポイント
async fn remove_item(
    State(state): State<AppState>,
    Path((session_id, medication_id)): Path<(Uuid, String)>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let session_id = SessionId::from_uuid(session_id);
    let medication_id = parse_medication_id(&medication_id)?;

    match state
        .cart_service
        .remove_from_cart(session_id, medication_id)
        .await
    {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// カート全削除エンドポイント
async fn clear_cart(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let session_id = SessionId::from_uuid(session_id);

    match state.cart_service.clear_cart(session_id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err) => Err(map_application_error(err)),
    }
}

// 注文確定エンドポイント
async fn checkout(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<OrderSummaryResponse>, (StatusCode, Json<ApiError>)> {
    let session_id = SessionId::from_uuid(session_id);

    match state.cart_service.checkout(session_id).await {
        Ok(summary) => Ok(Json(OrderSummaryResponse::from_summary(&summary))),
        Err(err) => Err(map_application_error(err)),
    }
}

fn parse_medication_id(raw: &str) -> Result<MedicationId, (StatusCode, Json<ApiError>)> {
    MedicationId::new(raw).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: format!("Invalid medication id: {}", err),
                code: "INVALID_MEDICATION_ID".to_string(),
            }),
        )
    })
}

// アプリケーションエラーをHTTPレスポンスに変換
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match &err {
        ApplicationError::DomainError(domain_err) => match domain_err {
            DomainError::InsufficientStock => (
                StatusCode::CONFLICT,
                Json(ApiError {
                    error: "No hay suficiente stock disponible para esa cantidad.".to_string(),
                    code: "INSUFFICIENT_STOCK".to_string(),
                }),
            ),
            DomainError::EmptyCartCheckout => (
                StatusCode::CONFLICT,
                Json(ApiError {
                    error: "El carrito está vacío. Agrega al menos un medicamento.".to_string(),
                    code: "EMPTY_CART".to_string(),
                }),
            ),
            DomainError::InvalidQuantity => (
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: err.to_string(),
                    code: "INVALID_QUANTITY".to_string(),
                }),
            ),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: err.to_string(),
                    code: "DOMAIN_ERROR".to_string(),
                }),
            ),
        },
        ApplicationError::SessionNotInitialized(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: err.to_string(),
                code: "SESSION_NOT_INITIALIZED".to_string(),
            }),
        ),
        ApplicationError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: err.to_string(),
                code: "NOT_FOUND".to_string(),
            }),
        ),
        ApplicationError::RepositoryError(_) | ApplicationError::EventPublishingFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: err.to_string(),
                code: "INTERNAL_ERROR".to_string(),
            }),
        ),
    }
}
