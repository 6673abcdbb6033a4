//! Line Classifier
//!
//! 1行単位でCategoryStoreのキーワードに基づいて分類する。
//! 複数カテゴリに一致した場合はストアの順序で先頭が勝つ。

use super::builtin::CategoryDef;
use super::store::CategoryStore;

/// 見出し行とみなすための強調マーカー
pub const EMPHASIS_MARKER: &str = "**";

/// 1行分類器
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'a> {
    store: &'a CategoryStore,
}

impl<'a> LineClassifier<'a> {
    pub fn new(store: &'a CategoryStore) -> Self {
        Self { store }
    }

    /// 見出し行ならカテゴリのインデックスを返す
    ///
    /// キーワードを含み、かつ`**`または`:`を含む行を見出しとみなす。
    pub fn header_category(&self, line: &str) -> Option<usize> {
        if !line.contains(EMPHASIS_MARKER) && !line.contains(':') {
            return None;
        }
        self.keyword_category(line)
    }

    /// キーワードを含む最初のカテゴリのインデックスを返す
    pub fn keyword_category(&self, line: &str) -> Option<usize> {
        let lower = line.to_lowercase();
        self.store
            .all()
            .iter()
            .position(|cat| cat.matches_lowercase(&lower))
    }

    /// 行がいずれかのカテゴリタイトルに含まれるか
    pub fn is_title_fragment(&self, text: &str) -> bool {
        self.store.all().iter().any(|cat| cat.title_contains(text))
    }

    pub fn category(&self, index: usize) -> Option<&'a CategoryDef> {
        self.store.by_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(store: &CategoryStore, index: Option<usize>) -> Option<&str> {
        index.and_then(|i| store.by_index(i)).map(|c| c.id.as_str())
    }

    #[test]
    fn test_header_requires_marker_or_colon() {
        let store = CategoryStore::builtin();
        let classifier = LineClassifier::new(&store);

        assert_eq!(
            id_of(&store, classifier.header_category("**CULTIVATION:**")),
            Some("cultivation")
        );
        assert_eq!(
            id_of(&store, classifier.header_category("Harvest:")),
            Some("harvesting")
        );
        assert_eq!(
            id_of(&store, classifier.header_category("**Growth Info**")),
            Some("growth")
        );
        assert_eq!(classifier.header_category("Cultivation tips below"), None);
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let store = CategoryStore::builtin();
        let classifier = LineClassifier::new(&store);
        assert_eq!(
            id_of(&store, classifier.header_category("**cUlTiVaTiOn**")),
            Some("cultivation")
        );
    }

    #[test]
    fn test_first_category_wins_ties() {
        let store = CategoryStore::builtin();
        let classifier = LineClassifier::new(&store);
        // "care" (index 1) and "pest" (index 4) both match
        assert_eq!(
            id_of(&store, classifier.header_category("**Pest care:**")),
            Some("care")
        );
    }

    #[test]
    fn test_keyword_category_no_match() {
        let store = CategoryStore::builtin();
        let classifier = LineClassifier::new(&store);
        assert_eq!(classifier.keyword_category("just some random text"), None);
    }

    #[test]
    fn test_title_fragment() {
        let store = CategoryStore::builtin();
        let classifier = LineClassifier::new(&store);
        assert!(classifier.is_title_fragment("Common Issues"));
        assert!(classifier.is_title_fragment("harvesting"));
        assert!(!classifier.is_title_fragment("Pick when ripe"));
    }
}
