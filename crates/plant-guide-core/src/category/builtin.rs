//! Builtin Category Definitions
//!
//! コード内で定義されるビルトインカテゴリ。
//! 農業ガイドの分類はこの5つで固定され、順序もタイブレークに使われる。

use serde::{Deserialize, Serialize};

/// ビルトインカテゴリ定義（評価順）
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        id: "cultivation",
        title: "Cultivation & Planting",
        icon: "🌱",
        color: "#166534",
        bg_color: "#f0fdf4",
        keywords: &["cultivation"],
    },
    BuiltinCategory {
        id: "care",
        title: "Care & Maintenance",
        icon: "🌿",
        color: "#059669",
        bg_color: "#ecfdf5",
        keywords: &["care", "maintenance"],
    },
    BuiltinCategory {
        id: "harvesting",
        title: "Harvesting & Storage",
        icon: "🌾",
        color: "#ca8a04",
        bg_color: "#fffbeb",
        keywords: &["harvesting", "harvest"],
    },
    BuiltinCategory {
        id: "growth",
        title: "Growth Information",
        icon: "📏",
        color: "#0c4a6e",
        bg_color: "#f0f9ff",
        keywords: &["growth", "maturation", "size"],
    },
    BuiltinCategory {
        id: "issues",
        title: "Common Issues",
        icon: "🦠",
        color: "#b91c1c",
        bg_color: "#fef2f2",
        keywords: &["disease", "pest", "problem", "issues", "common"],
    },
];

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリID（一意識別子、設定ファイルのキー）
    pub id: &'static str,
    /// 表示タイトル
    pub title: &'static str,
    /// 表示アイコン
    pub icon: &'static str,
    /// 表示色（見出し・枠線）
    pub color: &'static str,
    /// 背景色
    pub bg_color: &'static str,
    /// トリガーキーワード（小文字、大文字小文字を区別せず照合）
    pub keywords: &'static [&'static str],
}

/// ランタイムカテゴリ定義
///
/// ビルトインから構築され、`config.toml`のキーワードで拡張される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: String,
    pub bg_color: String,
    /// 小文字に正規化済み
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryDef {
    /// 小文字化済みの行がいずれかのキーワードを含むか
    pub fn matches_lowercase(&self, line_lower: &str) -> bool {
        self.keywords.iter().any(|k| line_lower.contains(k.as_str()))
    }

    /// テキストがタイトルの一部か（見出し行の混入判定用）
    pub fn title_contains(&self, text: &str) -> bool {
        self.title
            .to_lowercase()
            .contains(text.to_lowercase().as_str())
    }
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self {
            id: builtin.id.to_string(),
            title: builtin.title.to_string(),
            icon: builtin.icon.to_string(),
            color: builtin.color.to_string(),
            bg_color: builtin.bg_color.to_string(),
            keywords: builtin.keywords.iter().map(|s| s.to_lowercase()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories_exist() {
        assert_eq!(BUILTIN_CATEGORIES.len(), 5);
        let ids: Vec<_> = BUILTIN_CATEGORIES.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec!["cultivation", "care", "harvesting", "growth", "issues"]
        );
    }

    #[test]
    fn test_builtin_keywords_are_lowercase() {
        for cat in BUILTIN_CATEGORIES {
            for kw in cat.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {kw} in {}", cat.id);
            }
        }
    }

    #[test]
    fn test_category_def_from_builtin() {
        let builtin = &BUILTIN_CATEGORIES[2];
        let def = CategoryDef::from(builtin);
        assert_eq!(def.id, "harvesting");
        assert_eq!(def.title, "Harvesting & Storage");
        assert_eq!(def.keywords, vec!["harvesting", "harvest"]);
    }

    #[test]
    fn test_title_contains_is_case_insensitive() {
        let def = CategoryDef::from(&BUILTIN_CATEGORIES[0]);
        assert!(def.title_contains("CULTIVATION"));
        assert!(def.title_contains("planting"));
        assert!(!def.title_contains("Needs full sun"));
    }
}
