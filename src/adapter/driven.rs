// 駆動される側アダプター（セッションストア・カタログ・イベントバスなど）

mod cart_repository;
mod catalog_provider;
mod console_logger;
mod event_bus;
mod order_code_generator;

pub use cart_repository::InMemoryCartRepository;
pub use catalog_provider::InMemoryCatalogProvider;
pub use console_logger::ConsoleLogger;
pub use event_bus::{EventBusConfig, InMemoryEventBus};
pub use order_code_generator::RandomOrderCodeGenerator;
