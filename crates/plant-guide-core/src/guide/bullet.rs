//! Bullet cleaning
//!
//! Markdown装飾と箇条書きマーカーを取り除き、`label: text`に分解する。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 行頭から取り除く箇条書きマーカー
const BULLET_MARKERS: &[char] = &['•', '-', '–', '—'];

/// 整形済みの箇条書き1項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    /// 最初の`:`より前（行頭の`:`は除く）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub text: String,
}

impl Bullet {
    /// 生の行を整形して箇条書きに変換
    ///
    /// 空になった行と、ラベルのみで本文が空の行は`None`。
    pub fn parse(line: &str) -> Option<Self> {
        let cleaned = clean_line(line);
        if cleaned.is_empty() {
            return None;
        }

        match cleaned.find(':') {
            Some(idx) if idx > 0 => {
                let label = cleaned[..idx].trim();
                let rest = cleaned[idx + 1..].trim();
                if rest.is_empty() {
                    return None;
                }
                Some(Self {
                    label: Some(label.to_string()),
                    text: rest.to_string(),
                })
            }
            _ => Some(Self {
                label: None,
                text: cleaned,
            }),
        }
    }
}

impl fmt::Display for Bullet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// `*`をすべて除去し、行頭のマーカーと空白を取り除く
///
/// ```rust
/// use plant_guide_core::guide::clean_line;
///
/// assert_eq!(clean_line("  - **Water:** weekly"), "Water: weekly");
/// assert_eq!(clean_line(&clean_line("• — Pick early")), "Pick early");
/// ```
pub fn clean_line(line: &str) -> String {
    let without_emphasis: String = line.chars().filter(|c| *c != '*').collect();
    without_emphasis
        .trim_start_matches(|c: char| c.is_whitespace() || BULLET_MARKERS.contains(&c))
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_strips_markers() {
        assert_eq!(clean_line("- Needs full sun"), "Needs full sun");
        assert_eq!(clean_line("• Plant in spring"), "Plant in spring");
        assert_eq!(clean_line("– dash"), "dash");
        assert_eq!(clean_line("— em dash"), "em dash");
        assert_eq!(clean_line("*** bold start"), "bold start");
        assert_eq!(clean_line("- - nested"), "nested");
    }

    #[test]
    fn test_clean_line_keeps_inner_dashes() {
        assert_eq!(clean_line("- well-drained soil"), "well-drained soil");
    }

    #[test]
    fn test_clean_line_is_idempotent() {
        let inputs = [
            "- **Soil:** loamy, well-drained",
            "  •  ** Space 30 cm apart **",
            "—— Water at dawn ——",
            "plain",
            "",
        ];
        for input in inputs {
            let once = clean_line(input);
            assert_eq!(clean_line(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_splits_label() {
        let bullet = Bullet::parse("Pest control: spray neem oil weekly").unwrap();
        assert_eq!(bullet.label.as_deref(), Some("Pest control"));
        assert_eq!(bullet.text, "spray neem oil weekly");
        assert_eq!(bullet.to_string(), "Pest control: spray neem oil weekly");
    }

    #[test]
    fn test_parse_drops_empty_label() {
        assert_eq!(Bullet::parse("Cultivation:"), None);
        assert_eq!(Bullet::parse("**CULTIVATION:**"), None);
        assert_eq!(Bullet::parse("  -  "), None);
    }

    #[test]
    fn test_parse_leading_colon_is_not_label() {
        let bullet = Bullet::parse(": stray colon").unwrap();
        assert_eq!(bullet.label, None);
        assert_eq!(bullet.text, ": stray colon");
    }

    #[test]
    fn test_parse_display_is_stable() {
        for line in ["- **Soil:** loamy: rich", "• Pick when ripe", "Light: full sun"] {
            let bullet = Bullet::parse(line).unwrap();
            let reparsed = Bullet::parse(&bullet.to_string()).unwrap();
            assert_eq!(reparsed, bullet);
        }
    }
}
