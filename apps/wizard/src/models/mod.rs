pub mod enhancement;
pub mod feedback;
pub mod resume;
pub mod template;

pub use enhancement::{EnhancementResult, ResumeVersion};
pub use feedback::{FeedbackResult, Recommendations};
pub use resume::{
    merge_skills, Certification, Education, Experience, Language, PersonalInfo, Project,
    ResumeRecord,
};
pub use template::{TemplateCategory, TemplateDescriptor};

use serde::{Deserialize, Deserializer};

/// Deserializes `null` the same way as a missing field: into `T::default()`.
/// Paired with `#[serde(default)]` so downstream code only ever checks emptiness.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
