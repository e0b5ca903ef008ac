use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::nullable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Modern,
    Classic,
    Creative,
}

impl TemplateCategory {
    /// Category implied by a template id when the catalog does not carry one.
    pub fn from_template_id(id: &str) -> Self {
        let id = id.to_ascii_lowercase();
        if id.contains("modern") || id.contains("minimalist") {
            TemplateCategory::Modern
        } else if id.contains("creative") {
            TemplateCategory::Creative
        } else {
            TemplateCategory::Classic
        }
    }

    /// Case-insensitive match on the category name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(TemplateCategory::Modern),
            "classic" => Some(TemplateCategory::Classic),
            "creative" => Some(TemplateCategory::Creative),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::Modern => "Modern",
            TemplateCategory::Classic => "Classic",
            TemplateCategory::Creative => "Creative",
        }
    }
}

/// One entry of the template catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub preview: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<TemplateCategory>,
}

impl TemplateDescriptor {
    pub fn new(id: &str, name: &str, description: &str, preview: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            preview: preview.to_string(),
            category: Some(TemplateCategory::from_template_id(id)),
        }
    }

    /// Fills the derived category and a placeholder preview when the backend left them out.
    pub fn normalize(&mut self) {
        if self.category.is_none() {
            self.category = Some(TemplateCategory::from_template_id(&self.id));
        }
        if self.name.is_empty() {
            self.name = self.id.clone();
        }
        if self.preview.is_empty() {
            self.preview = placeholder_preview(&self.name);
        }
    }

    pub fn category(&self) -> TemplateCategory {
        self.category
            .unwrap_or_else(|| TemplateCategory::from_template_id(&self.id))
    }

    /// Short feature tags shown on the template card.
    pub fn features(&self) -> &'static [&'static str] {
        match self.id.as_str() {
            "minimalist" => &["Clean Layout", "ATS Friendly", "Easy to Read"],
            "modern-professional" => &["Gradient Design", "Visual Hierarchy", "Professional"],
            "traditional" => &["Classic Format", "Conservative", "Time-tested"],
            "creative" => &["Unique Layout", "Portfolio Ready", "Eye-catching"],
            "executive" => &["Leadership Focus", "Achievement Driven", "Professional"],
            _ => &["Professional", "ATS Friendly"],
        }
    }
}

/// A category the backend sends that we do not know must not sink the whole
/// catalog; it is dropped and `normalize` derives one from the id.
fn lenient_category<'de, D>(deserializer: D) -> Result<Option<TemplateCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(TemplateCategory::parse))
}

pub fn placeholder_preview(name: &str) -> String {
    format!(
        "/placeholder.svg?height=600&width=400&text={}+Template",
        name.replace(' ', "+")
    )
}
