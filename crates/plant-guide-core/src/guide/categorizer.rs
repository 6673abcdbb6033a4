//! Guide Categorizer
//!
//! LLMが生成した農業ガイドのテキストを、カテゴリ別のセクションに分割する。
//!
//! 見出し行でカーソルを切り替え、同じカテゴリの内容は最初に出現した
//! セクションにまとめる。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use crate::category::{CategoryDef, CategoryStore, LineClassifier, EMPHASIS_MARKER};

static BUILTIN: Lazy<Categorizer> = Lazy::new(Categorizer::builtin);

/// カテゴリ別に整形されたセクション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    pub category: CategoryDef,
    pub bullets: Vec<Bullet>,
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategorizedGuide {
    /// 入力が無い、または空文字列
    InvalidInput,
    /// 構造が見つからなかった（生テキストをそのまま表示する）
    NoStructure { raw: String },
    /// 1つ以上の空でないセクション
    Sections { sections: Vec<GuideSection> },
}

impl CategorizedGuide {
    pub fn sections(&self) -> &[GuideSection] {
        match self {
            Self::Sections { sections } => sections,
            _ => &[],
        }
    }
}

/// 分類中のカテゴリごとのバケット（整形前）
struct Bucket<'s> {
    category: usize,
    lines: Vec<&'s str>,
}

/// ガイド分類器
#[derive(Debug, Clone)]
pub struct Categorizer {
    store: CategoryStore,
}

impl Categorizer {
    pub fn new(store: CategoryStore) -> Self {
        Self { store }
    }

    /// ビルトインカテゴリのみで分類器を構築
    pub fn builtin() -> Self {
        Self::new(CategoryStore::builtin())
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    /// テキストを分類
    pub fn categorize(&self, text: Option<&str>) -> CategorizedGuide {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => {
                tracing::debug!("categorize called without usable text");
                return CategorizedGuide::InvalidInput;
            }
        };

        let classifier = LineClassifier::new(&self.store);
        let buckets = collect_buckets(&classifier, text);

        let sections: Vec<GuideSection> = buckets
            .into_iter()
            .filter_map(|bucket| finish_section(&classifier, bucket))
            .collect();

        if sections.is_empty() {
            tracing::debug!("no categorized content, falling back to raw text");
            return CategorizedGuide::NoStructure {
                raw: text.to_string(),
            };
        }

        tracing::debug!(sections = sections.len(), "categorized guide");
        CategorizedGuide::Sections { sections }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::builtin()
    }
}

/// ビルトインカテゴリでテキストを分類
///
/// ```rust
/// use plant_guide_core::guide::{categorize, CategorizedGuide};
///
/// let guide = categorize(Some("**HARVESTING:**\n- Pick when ripe"));
/// assert_eq!(guide.sections()[0].category.id, "harvesting");
///
/// assert_eq!(categorize(None), CategorizedGuide::InvalidInput);
/// ```
pub fn categorize(text: Option<&str>) -> CategorizedGuide {
    BUILTIN.categorize(text)
}

fn collect_buckets<'s>(classifier: &LineClassifier<'_>, text: &'s str) -> Vec<Bucket<'s>> {
    let mut buckets: Vec<Bucket<'s>> = Vec::new();
    let mut current: Option<usize> = None;

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    tracing::debug!(lines = lines.len(), "splitting guide text");

    for line in lines {
        let target = if let Some(index) = classifier.header_category(line) {
            if current != Some(index) {
                tracing::debug!(category = index, header = line, "switching category");
            }
            current = Some(index);
            Some(index)
        } else if line.starts_with(EMPHASIS_MARKER) {
            None
        } else {
            current.or_else(|| classifier.keyword_category(line))
        };

        match target {
            Some(index) => push_line(&mut buckets, index, line),
            None => tracing::debug!(line, "dropping uncategorized line"),
        }
    }

    buckets
}

fn push_line<'s>(buckets: &mut Vec<Bucket<'s>>, category: usize, line: &'s str) {
    match buckets.iter_mut().find(|b| b.category == category) {
        Some(bucket) => bucket.lines.push(line),
        None => buckets.push(Bucket {
            category,
            lines: vec![line],
        }),
    }
}

fn finish_section(classifier: &LineClassifier<'_>, bucket: Bucket<'_>) -> Option<GuideSection> {
    let category = classifier.category(bucket.category)?;

    let bullets: Vec<Bullet> = bucket
        .lines
        .into_iter()
        .filter_map(Bullet::parse)
        .filter(|b| b.label.is_some() || !classifier.is_title_fragment(&b.text))
        .collect();

    if bullets.is_empty() {
        tracing::debug!(category = %category.id, "dropping empty section");
        return None;
    }

    Some(GuideSection {
        category: category.clone(),
        bullets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategoriesConfig, CategoryConfigEntry};

    fn texts(section: &GuideSection) -> Vec<String> {
        section.bullets.iter().map(|b| b.to_string()).collect()
    }

    fn ids(guide: &CategorizedGuide) -> Vec<&str> {
        guide
            .sections()
            .iter()
            .map(|s| s.category.id.as_str())
            .collect()
    }

    #[test]
    fn test_absent_input_is_invalid() {
        assert_eq!(categorize(None), CategorizedGuide::InvalidInput);
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert_eq!(categorize(Some("")), CategorizedGuide::InvalidInput);
    }

    #[test]
    fn test_whitespace_only_falls_back_to_raw() {
        assert_eq!(
            categorize(Some("  \n\t\n")),
            CategorizedGuide::NoStructure {
                raw: "  \n\t\n".to_string()
            }
        );
    }

    #[test]
    fn test_no_keywords_falls_back_to_raw() {
        let guide = categorize(Some("just some random text"));
        assert_eq!(
            guide,
            CategorizedGuide::NoStructure {
                raw: "just some random text".to_string()
            }
        );
    }

    #[test]
    fn test_headers_with_bullets() {
        let input = "**CULTIVATION:**\n- Needs full sun\n- Plant in spring\n**HARVESTING:**\n- Pick when ripe";
        let guide = categorize(Some(input));
        let sections = guide.sections();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].category.title, "Cultivation & Planting");
        assert_eq!(texts(&sections[0]), vec!["Needs full sun", "Plant in spring"]);
        assert_eq!(sections[1].category.title, "Harvesting & Storage");
        assert_eq!(texts(&sections[1]), vec!["Pick when ripe"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "**CULTIVATION:**\r\n- Needs full sun\r\n\r\n- Plant in spring\r\n";
        let guide = categorize(Some(input));
        assert_eq!(
            texts(&guide.sections()[0]),
            vec!["Needs full sun", "Plant in spring"]
        );
    }

    #[test]
    fn test_repeated_header_merges_into_first_occurrence() {
        let input = "\
**Harvesting:**
- Pick in the morning
**Cultivation:**
- Sow indoors
**Harvesting:**
- Store in a cool place";
        let guide = categorize(Some(input));

        assert_eq!(ids(&guide), vec!["harvesting", "cultivation"]);
        assert_eq!(
            texts(&guide.sections()[0]),
            vec!["Pick in the morning", "Store in a cool place"]
        );
    }

    #[test]
    fn test_bare_header_contributes_no_bullet() {
        let guide = categorize(Some("Cultivation:\n- Sow after frost"));
        assert_eq!(texts(&guide.sections()[0]), vec!["Sow after frost"]);
    }

    #[test]
    fn test_unopened_labelled_line_is_classified() {
        let guide = categorize(Some("Pest control: spray neem oil weekly"));
        let sections = guide.sections();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category.title, "Common Issues");
        let bullet = &sections[0].bullets[0];
        assert_eq!(bullet.label.as_deref(), Some("Pest control"));
        assert_eq!(bullet.text, "spray neem oil weekly");
    }

    #[test]
    fn test_header_with_inline_content_keeps_content() {
        let guide = categorize(Some("**Care:** Water twice a week"));
        let bullet = &guide.sections()[0].bullets[0];
        assert_eq!(bullet.label.as_deref(), Some("Care"));
        assert_eq!(bullet.text, "Water twice a week");
    }

    #[test]
    fn test_case_insensitive_header() {
        let guide = categorize(Some("**cUlTiVaTiOn**\n- Loamy soil"));
        assert_eq!(ids(&guide), vec!["cultivation"]);
        assert_eq!(texts(&guide.sections()[0]), vec!["Loamy soil"]);
    }

    #[test]
    fn test_title_only_lines_are_dropped() {
        let input = "**Common Issues**\n- Aphids on new growth\n**Growth Info**";
        let guide = categorize(Some(input));

        assert_eq!(ids(&guide), vec!["issues"]);
        assert_eq!(texts(&guide.sections()[0]), vec!["Aphids on new growth"]);
    }

    #[test]
    fn test_non_header_emphasis_line_is_dropped() {
        let input = "**Cultivation:**\n**Tip**\n- Mulch in autumn";
        let guide = categorize(Some(input));
        assert_eq!(texts(&guide.sections()[0]), vec!["Mulch in autumn"]);
    }

    #[test]
    fn test_lines_before_first_header_need_keywords() {
        let input = "Here is your guide.\nHarvest when pods dry\n**Care:**\n- Prune lightly";
        let guide = categorize(Some(input));

        assert_eq!(ids(&guide), vec!["harvesting", "care"]);
        assert_eq!(texts(&guide.sections()[0]), vec!["Harvest when pods dry"]);
    }

    #[test]
    fn test_plain_keyword_line_opens_no_cursor() {
        // no colon or emphasis, so this is not a header
        let input = "Cultivation tips below\nKeep weeds down";
        let guide = categorize(Some(input));

        assert_eq!(ids(&guide), vec!["cultivation"]);
        assert_eq!(texts(&guide.sections()[0]), vec!["Cultivation tips below"]);
    }

    #[test]
    fn test_sections_emptied_by_cleaning_fall_back_to_raw() {
        let input = "**Cultivation:**\n**Harvesting:**";
        assert_eq!(
            categorize(Some(input)),
            CategorizedGuide::NoStructure {
                raw: input.to_string()
            }
        );
    }

    #[test]
    fn test_configured_keywords_route_lines() {
        let config = CategoriesConfig {
            categories: [(
                "care".to_string(),
                CategoryConfigEntry {
                    keywords: vec!["Watering".to_string()],
                },
            )]
            .into_iter()
            .collect(),
        };
        let store = CategoryStore::builtin().with_config(&config).unwrap();
        let categorizer = Categorizer::new(store);

        let guide = categorizer.categorize(Some("**Watering:**\n- Deep soak weekly"));
        assert_eq!(ids(&guide), vec!["care"]);
        assert_eq!(texts(&guide.sections()[0]), vec!["Deep soak weekly"]);
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(categorize(None)).unwrap();
        assert_eq!(json["kind"], "invalid_input");

        let json = serde_json::to_value(categorize(Some("Harvest: late summer"))).unwrap();
        assert_eq!(json["kind"], "sections");
        assert_eq!(json["sections"][0]["category"]["id"], "harvesting");
        assert_eq!(json["sections"][0]["bullets"][0]["text"], "late summer");
    }
}
