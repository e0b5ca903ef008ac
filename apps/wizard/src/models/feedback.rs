use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::nullable;

/// Structured recommendations, one bucket per resume area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub formatting: Vec<String>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.formatting.is_empty()
    }
}

/// ATS scoring result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    #[serde(default, alias = "score", deserialize_with = "score_0_100")]
    pub ats_score: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub missing_skills: Vec<String>,
    /// keyword → density in percent.
    #[serde(default, deserialize_with = "nullable")]
    pub keyword_density: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub format_issues: Vec<String>,
    #[serde(default, deserialize_with = "score_0_100")]
    pub match_percentage: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Recommendations,
}

impl FeedbackResult {
    pub fn score_message(&self) -> &'static str {
        match self.ats_score {
            80.. => "Excellent match!",
            60..=79 => "Good match with room for improvement",
            _ => "Needs significant improvement",
        }
    }

    /// Keywords ordered by density, highest first; ties keep alphabetical order.
    pub fn top_keywords(&self, n: usize) -> Vec<(&str, f64)> {
        let mut keywords: Vec<(&str, f64)> = self
            .keyword_density
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        keywords.sort_by(|a, b| b.1.total_cmp(&a.1));
        keywords.truncate(n);
        keywords
    }
}

/// Accepts any JSON number (or null) and clamps it into 0..=100.
fn score_0_100<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}
