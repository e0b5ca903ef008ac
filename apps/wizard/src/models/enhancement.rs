use serde::{Deserialize, Serialize};

use super::nullable;
use super::resume::ResumeRecord;

/// Original record paired with the AI-modified one. Never merged automatically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    #[serde(default, deserialize_with = "nullable")]
    pub original_resume: ResumeRecord,
    #[serde(default, deserialize_with = "nullable")]
    pub enhanced_resume: ResumeRecord,
    /// Changes already applied to `enhanced_resume`.
    #[serde(default, deserialize_with = "nullable")]
    pub improvements: Vec<String>,
    /// Further changes the user has to make by hand.
    #[serde(default, deserialize_with = "nullable")]
    pub ai_suggestions: Vec<String>,
}

impl EnhancementResult {
    pub fn normalize(&mut self) {
        self.original_resume.normalize();
        self.enhanced_resume.normalize();
    }

    pub fn version(&self, version: ResumeVersion) -> &ResumeRecord {
        match version {
            ResumeVersion::Original => &self.original_resume,
            ResumeVersion::Enhanced => &self.enhanced_resume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeVersion {
    Original,
    Enhanced,
}
