use pharmacy_cart_management::adapter::driven::{
    ConsoleLogger, InMemoryCartRepository, InMemoryCatalogProvider, InMemoryEventBus,
    RandomOrderCodeGenerator,
};
use pharmacy_cart_management::adapter::driver::rest_api::{create_router, AppStateInner};
use pharmacy_cart_management::adapter::ServerConfig;
use pharmacy_cart_management::application::service::{
    CartApplicationService, CartQueryService, CatalogQueryService,
};
use pharmacy_cart_management::domain::handler::ShopperNotificationHandler;
use pharmacy_cart_management::domain::port::{CartRepository, CatalogProvider, Logger};

use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 薬局カート管理システム REST API ===");
    println!("ドメイン駆動設計サンプルプロジェクト");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // サーバー設定を読み込む
    let config = ServerConfig::from_env()?;
    println!(
        "サーバー設定を読み込みました: {} (在庫わずか閾値: {})",
        config.bind_address(),
        config.low_stock_threshold
    );

    // ロガーを作成
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    // インメモリアダプターを作成
    let cart_repository = InMemoryCartRepository::new();
    let catalog_provider = Arc::new(InMemoryCatalogProvider::with_seed_catalog()?);
    let order_code_generator = Arc::new(RandomOrderCodeGenerator::new());

    // イベントバスを作成
    let event_bus = Arc::new(InMemoryEventBus::new(logger.clone()));

    // 通知ハンドラーを作成して登録
    // カート追加と注文確定の両方で買い物客向けメッセージを流す
    let notification_handler = ShopperNotificationHandler::new(logger.clone());
    event_bus
        .subscribe_item_added(notification_handler.clone())
        .await?;
    event_bus
        .subscribe_order_confirmed(notification_handler)
        .await?;
    println!("イベントハンドラーを登録しました");

    // アプリケーションサービスを作成
    let cart_service = CartApplicationService::new(
        cart_repository.clone(),
        catalog_provider.clone() as Arc<dyn CatalogProvider>,
        order_code_generator,
        event_bus.clone(),
    );
    let cart_query_service = CartQueryService::new(
        Arc::new(cart_repository.clone()) as Arc<dyn CartRepository>
    );
    let catalog_query_service = CatalogQueryService::new(
        catalog_provider as Arc<dyn CatalogProvider>,
        Arc::new(cart_repository) as Arc<dyn CartRepository>,
    );

    // アプリケーション状態を作成
    let app_state = AppStateInner {
        cart_service: Arc::new(cart_service),
        cart_query_service: Arc::new(cart_query_service),
        catalog_query_service: Arc::new(catalog_query_service),
        config: config.clone(),
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    println!(
        "REST APIサーバーが起動しました: http://{}",
        config.bind_address()
    );
    println!("ヘルスチェック: GET /health");
    println!("API仕様:");
    println!("  GET    /medications - 医薬品一覧・検索（?q=, ?session_id=）");
    println!("  GET    /medications/:id - 医薬品詳細（残余在庫つき）");
    println!("  POST   /cart/sessions - 買い物セッション開始");
    println!("  GET    /cart/sessions/:id - カート表示");
    println!("  POST   /cart/sessions/:id/items - カートに追加");
    println!("  PUT    /cart/sessions/:id/items/:medication_id - 数量変更");
    println!("  DELETE /cart/sessions/:id/items/:medication_id - 明細削除");
    println!("  DELETE /cart/sessions/:id/items - カートを空にする");
    println!("  POST   /cart/sessions/:id/checkout - 注文確定");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
