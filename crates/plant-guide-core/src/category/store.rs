//! Category Store
//!
//! カテゴリ定義のランタイムストア。
//! ビルトインの順序を保ったまま、設定ファイルの追加キーワードをマージして保持。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::builtin::{CategoryDef, BUILTIN_CATEGORIES};
use crate::error::{PlantGuideError, Result};

/// カテゴリ定義のランタイムストア
///
/// 構築後は変更しない。`all()`の順序がタイブレーク順になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStore {
    categories: Vec<CategoryDef>,
}

impl CategoryStore {
    /// ビルトインカテゴリのみで初期化
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES.iter().map(CategoryDef::from).collect();
        Self { categories }
    }

    /// 設定ファイルのキーワードを追加
    ///
    /// - 既存カテゴリのキーワードに追記（小文字化、重複は無視）
    /// - 未知のカテゴリIDはエラー
    pub fn with_config(mut self, config: &CategoriesConfig) -> Result<Self> {
        for (id, entry) in &config.categories {
            let cat = self
                .categories
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| PlantGuideError::UnknownCategory { id: id.clone() })?;

            for keyword in &entry.keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() || cat.keywords.contains(&keyword) {
                    continue;
                }
                tracing::debug!(category = %cat.id, keyword = %keyword, "extra keyword");
                cat.keywords.push(keyword);
            }
        }
        Ok(self)
    }

    /// カテゴリ定義を取得
    pub fn get(&self, id: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// インデックスでカテゴリ定義を取得
    pub fn by_index(&self, index: usize) -> Option<&CategoryDef> {
        self.categories.get(index)
    }

    /// 全カテゴリを取得（評価順）
    pub fn all(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// カテゴリID一覧
    pub fn ids(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `config.toml`のcategoriesセクション
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(flatten)]
    pub categories: BTreeMap<String, CategoryConfigEntry>,
}

impl CategoriesConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// 個別カテゴリの設定エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfigEntry {
    /// 追加のトリガーキーワード
    #[serde(default)]
    pub keywords: Vec<String>,
}
