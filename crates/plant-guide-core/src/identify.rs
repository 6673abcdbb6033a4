//! Identification Module
//!
//! 植物識別APIのレスポンス（JSON）を要約し、ガイド生成用のプロンプトを組み立てる。
//! ネットワーク通信は行わない。レスポンスは呼び出し側が取得して渡す。
//!
//! ## 使用例
//!
//! ```rust
//! use plant_guide_core::identify::{parse_response, PlantIdResponse, PlantIdentity};
//!
//! let json = r#"{"suggestions":[{"plant_name":"Ocimum basilicum",
//!     "plant_details":{"common_names":["Basil"]}}]}"#;
//! let response: PlantIdResponse = parse_response("Plant.id", json)?;
//! let digest = response.digest().unwrap();
//! assert_eq!(digest.info, "Plant.id Name: Ocimum basilicum\nCommon Names: Basil\n");
//!
//! let name = PlantIdentity::combine(Some(&digest), None).unwrap();
//! assert_eq!(name.to_string(), "Ocimum basilicum / Basil");
//! # Ok::<(), plant_guide_core::PlantGuideError>(())
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PlantGuideError, Result};

/// Pl@ntNetのレスポンスが読めなかった場合の要約
pub const PLANTNET_ERROR_NOTE: &str = "Pl@ntNet API error.\n";

/// Geminiのレスポンスに本文が無い場合のテキスト
pub const NO_GUIDE_TEXT: &str = "No agricultural details found.";

/// 植物が特定できなかった場合の表示
pub const NO_PLANT_DETECTED: &str = "No plant detected in the image.";

/// JSONレスポンスをパース（エラーにAPI名を付与）
pub fn parse_response<T: DeserializeOwned>(source_name: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| PlantGuideError::ResponseParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// 1つのAPIレスポンスの要約
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Digest {
    /// 学名（無ければ空）
    pub scientific: String,
    /// 一般名（無ければ空）
    pub common: String,
    /// プロンプトに埋め込む要約行（各行改行終端）
    pub info: String,
}

fn push_line(info: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        info.push_str(&format!("{}: {}\n", label, value));
    }
}

fn first_of(values: Option<&Vec<String>>) -> String {
    values
        .and_then(|v| v.first())
        .cloned()
        .unwrap_or_default()
}

fn first_name<'a>(mut names: impl Iterator<Item = &'a str>) -> String {
    names.find(|s| !s.is_empty()).unwrap_or_default().to_string()
}

// ============================================================================
// Plant.id
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantIdResponse {
    /// `null`でも読めるようにOption（空と同じ扱い）
    #[serde(default)]
    pub suggestions: Option<Vec<PlantIdSuggestion>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantIdSuggestion {
    pub plant_name: Option<String>,
    pub plant_details: Option<PlantIdDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantIdDetails {
    pub common_names: Option<Vec<String>>,
    pub taxonomy: Option<serde_json::Map<String, serde_json::Value>>,
    pub wiki_description: Option<WikiDescription>,
    pub synonyms: Option<Vec<String>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiDescription {
    pub value: Option<String>,
}

impl PlantIdResponse {
    /// 最上位候補を要約（候補が無ければNone）
    pub fn digest(&self) -> Option<Digest> {
        let best = self.suggestions.as_deref()?.first()?;
        let details = best.plant_details.as_ref();

        let scientific = best.plant_name.clone().unwrap_or_default();
        let common = first_of(details.and_then(|d| d.common_names.as_ref()));
        let name = [scientific.as_str(), common.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown plant");

        let mut info = String::new();
        push_line(&mut info, "Plant.id Name", name);

        if let Some(details) = details {
            if let Some(names) = &details.common_names {
                push_line(&mut info, "Common Names", &names.join(", "));
            }
            if let Some(taxonomy) = &details.taxonomy {
                let ranks: Vec<String> = taxonomy
                    .iter()
                    .map(|(rank, value)| match value.as_str() {
                        Some(s) => format!("{}: {}", rank, s),
                        None => format!("{}: {}", rank, value),
                    })
                    .collect();
                push_line(&mut info, "Taxonomy", &ranks.join(", "));
            }
            if let Some(wiki) = details.wiki_description.as_ref().and_then(|w| w.value.as_ref()) {
                push_line(&mut info, "Wiki", wiki);
            }
            if let Some(synonyms) = &details.synonyms {
                push_line(&mut info, "Synonyms", &synonyms.join(", "));
            }
            if let Some(url) = &details.url {
                push_line(&mut info, "More info", url);
            }
        }

        Some(Digest {
            scientific,
            common,
            info,
        })
    }
}

// ============================================================================
// Pl@ntNet
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantNetResponse {
    #[serde(default)]
    pub results: Option<Vec<PlantNetResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantNetResult {
    pub species: Option<PlantNetSpecies>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantNetSpecies {
    pub scientific_name_without_author: Option<String>,
    pub common_names: Option<Vec<String>>,
    pub family: Option<PlantNetTaxon>,
    pub genus: Option<PlantNetTaxon>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantNetTaxon {
    pub scientific_name: Option<String>,
}

impl PlantNetResponse {
    /// JSONから要約（読めなければエラー注記の要約）
    ///
    /// Pl@ntNetの失敗は致命的にせず、プロンプトに注記を残す。
    pub fn digest_from_json(json: &str) -> Option<Digest> {
        match parse_response::<Self>("Pl@ntNet", json) {
            Ok(response) => response.digest(),
            Err(e) => {
                tracing::warn!("{}", e);
                Some(Digest {
                    info: PLANTNET_ERROR_NOTE.to_string(),
                    ..Digest::default()
                })
            }
        }
    }

    /// 最上位結果を要約（結果が無ければNone）
    pub fn digest(&self) -> Option<Digest> {
        let best = self.results.as_deref()?.first()?;
        let species = best.species.as_ref();

        let scientific = species
            .and_then(|s| s.scientific_name_without_author.clone())
            .unwrap_or_default();
        let common = first_of(species.and_then(|s| s.common_names.as_ref()));
        let name = [scientific.as_str(), common.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown");

        let mut info = String::new();
        push_line(&mut info, "Pl@ntNet Name", name);

        if let Some(species) = species {
            if let Some(names) = &species.common_names {
                push_line(&mut info, "Common Names", &names.join(", "));
            }
            let family = species.family.as_ref().and_then(|t| t.scientific_name.as_deref());
            push_line(&mut info, "Family", family.unwrap_or_default());
            let genus = species.genus.as_ref().and_then(|t| t.scientific_name.as_deref());
            push_line(&mut info, "Genus", genus.unwrap_or_default());
        }

        Some(Digest {
            scientific,
            common,
            info,
        })
    }
}

// ============================================================================
// Display name
// ============================================================================

/// 表示用の植物名（学名と一般名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantIdentity {
    pub scientific: String,
    pub common: String,
}

impl PlantIdentity {
    /// Plant.idを優先し、足りない方をPl@ntNetで補う
    ///
    /// どちらの名前も得られなければNone。
    pub fn combine(plant_id: Option<&Digest>, plant_net: Option<&Digest>) -> Option<Self> {
        let digests = [plant_id, plant_net];
        let scientific = first_name(digests.iter().flatten().map(|d| d.scientific.as_str()));
        let common = first_name(digests.iter().flatten().map(|d| d.common.as_str()));

        if scientific.is_empty() && common.is_empty() {
            return None;
        }
        Some(Self { scientific, common })
    }
}

impl fmt::Display for PlantIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scientific)?;
        if !self.common.is_empty() {
            if !self.scientific.is_empty() {
                f.write_str(" / ")?;
            }
            f.write_str(&self.common)?;
        }
        Ok(())
    }
}

// ============================================================================
// Gemini
// ============================================================================

/// ガイド生成を依頼するプロンプト
pub fn guide_prompt(plant_id_info: &str, plant_net_info: &str) -> String {
    format!(
        "Given the following plant identification results from Plant.id and Pl@ntNet, \
         and the attached image, provide a concise, practical agricultural guide for this plant. \
         Use the info below:\n{plant_id_info}\n{plant_net_info}\n\n\
         Format the result in these categories: Cultivation, Care & Maintenance, Harvesting, \
         Growth Info, Common Issues. Use bullet points, keep each point short and practical."
    )
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiPart {
    pub text: Option<String>,
}

impl GeminiResponse {
    /// 最初の候補の最初のパートのテキスト
    ///
    /// パートが無ければ`NO_GUIDE_TEXT`。パートはあるがテキストが無い場合はNone
    /// （分類すると`InvalidInput`になる）。
    pub fn guide_text(&self) -> Option<&str> {
        let first_part = self
            .candidates
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_deref())
            .and_then(|p| p.first());

        match first_part {
            Some(part) => part.text.as_deref(),
            None => Some(NO_GUIDE_TEXT),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
