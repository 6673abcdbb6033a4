//! # Category Module
//!
//! 農業ガイドの行を意味的なカテゴリに分類する機能を提供する。
//!
//! ## カテゴリ
//!
//! - **Cultivation & Planting**: 植え付け、栽培条件
//! - **Care & Maintenance**: 水やり、剪定、施肥
//! - **Harvesting & Storage**: 収穫、保存
//! - **Growth Information**: 成長、成熟、サイズ
//! - **Common Issues**: 病気、害虫、よくある問題
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインカテゴリ定義
//! - `store`: カテゴリ定義のランタイムストア
//! - `classifier`: 1行単位の分類器
//!
//! ## 使用例
//!
//! ```rust
//! use plant_guide_core::category::{CategoryStore, LineClassifier};
//!
//! let store = CategoryStore::builtin();
//! assert_eq!(store.all().len(), 5);
//!
//! let classifier = LineClassifier::new(&store);
//! let index = classifier.header_category("**HARVESTING:**").unwrap();
//! assert_eq!(store.by_index(index).unwrap().id, "harvesting");
//! ```

mod builtin;
mod classifier;
mod store;

// Re-exports
pub use builtin::{BuiltinCategory, CategoryDef, BUILTIN_CATEGORIES};
pub use classifier::{LineClassifier, EMPHASIS_MARKER};
pub use store::{CategoriesConfig, CategoryConfigEntry, CategoryStore};
