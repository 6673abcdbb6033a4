//! # Guide Module
//!
//! LLMが生成した農業ガイドのテキストをカテゴリ別セクションに整形する。
//!
//! ## 結果
//!
//! - `Sections`: 1つ以上の空でないセクション（最初に出現した順）
//! - `NoStructure`: カテゴリが見つからない。生テキストをそのまま表示する
//! - `InvalidInput`: 入力が無いか空文字列
//!
//! ## 使用例
//!
//! ```rust
//! use plant_guide_core::guide::{categorize, CategorizedGuide};
//!
//! let text = "**CULTIVATION:**\n- Needs full sun\n**HARVESTING:**\n- Pick when ripe";
//! let guide = categorize(Some(text));
//! let titles: Vec<_> = guide
//!     .sections()
//!     .iter()
//!     .map(|s| s.category.title.as_str())
//!     .collect();
//! assert_eq!(titles, vec!["Cultivation & Planting", "Harvesting & Storage"]);
//!
//! assert!(matches!(
//!     categorize(Some("just some random text")),
//!     CategorizedGuide::NoStructure { .. }
//! ));
//! ```

mod bullet;
mod categorizer;

pub use bullet::{clean_line, Bullet};
pub use categorizer::{categorize, CategorizedGuide, Categorizer, GuideSection};
