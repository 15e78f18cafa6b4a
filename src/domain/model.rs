// ドメインモデル（エンティティと値オブジェクト）

mod cart;
mod catalog;
mod quantity_stepper;
mod value_objects;

pub use value_objects::{
    CartLine,
    MedicationId,
    Money,
    OrderCode,
    SessionId,
};

pub use cart::{Cart, OrderSummary};
pub use catalog::{CatalogItem, StockStatus};
pub use quantity_stepper::QuantityStepper;
