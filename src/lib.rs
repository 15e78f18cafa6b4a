// 薬局カート管理システム
// ドメイン駆動設計によるカート状態管理と在庫照合

pub mod adapter;
pub mod application;
pub mod domain;
