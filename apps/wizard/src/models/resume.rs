use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::nullable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub linked_in: String,
    #[serde(default, deserialize_with = "nullable")]
    pub website: String,
    #[serde(default, deserialize_with = "nullable")]
    pub github: String,
    #[serde(default, deserialize_with = "nullable")]
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable")]
    pub position: String,
    #[serde(default, deserialize_with = "nullable")]
    pub job_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub current: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub achievements: Vec<String>,
}

impl Experience {
    /// `position` and `jobTitle` are two names for the same field.
    /// Whichever one is filled populates the other; `position` wins a conflict.
    pub fn sync_title(&mut self) {
        if self.position.is_empty() {
            self.position = self.job_title.clone();
        } else if self.job_title != self.position {
            self.job_title = self.position.clone();
        }
    }

    pub fn title(&self) -> &str {
        if self.position.is_empty() {
            &self.job_title
        } else {
            &self.position
        }
    }

    /// Display date range. A current role ignores `endDate` entirely.
    pub fn date_range(&self) -> String {
        let end = if self.current {
            "Present"
        } else {
            self.end_date.as_str()
        };
        match (self.start_date.is_empty(), end.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.start_date.clone(),
            (true, false) => end.to_string(),
            (false, false) => format!("{} - {}", self.start_date, end),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub institution: String,
    #[serde(default, deserialize_with = "nullable")]
    pub degree: String,
    #[serde(default, deserialize_with = "nullable")]
    pub field: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub year: String,
    #[serde(default, deserialize_with = "nullable")]
    pub gpa: String,
}

impl Education {
    pub fn heading(&self) -> String {
        if self.field.is_empty() {
            self.degree.clone()
        } else {
            format!("{} in {}", self.degree, self.field)
        }
    }

    /// Either the single `year`, or the start/end range when no year was extracted.
    pub fn period(&self) -> String {
        if !self.year.is_empty() {
            return self.year.clone();
        }
        match (self.start_date.is_empty(), self.end_date.is_empty()) {
            (false, false) => format!("{} - {}", self.start_date, self.end_date),
            (true, false) => self.end_date.clone(),
            (false, true) => self.start_date.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub issuer: String,
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub proficiency: String,
}

/// The aggregate edited throughout the wizard.
///
/// Every collection is a plain `Vec`, so "no data" is always an empty
/// sequence and never an absent field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "nullable")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "nullable")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "nullable")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "nullable")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "nullable")]
    pub languages: Vec<Language>,
    /// Extraction output with no known home. Kept for round-trips, never shown.
    #[serde(default, deserialize_with = "nullable")]
    pub unexpected_fields: Map<String, Value>,
    #[serde(default, deserialize_with = "nullable")]
    pub raw_text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub job_description: String,
}

impl ResumeRecord {
    /// Brings a freshly received record into the shape every screen expects.
    /// Entries without an id get a fresh one so list edits can address them.
    pub fn normalize(&mut self) {
        for exp in &mut self.experience {
            exp.sync_title();
            assign_id(&mut exp.id);
        }
        for edu in &mut self.education {
            assign_id(&mut edu.id);
        }
        for project in &mut self.projects {
            assign_id(&mut project.id);
        }
        for cert in &mut self.certifications {
            assign_id(&mut cert.id);
        }
        self.skills = self
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Returns the first required field that is empty, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.personal_info.full_name.trim().is_empty() {
            Some("Full name")
        } else if self.personal_info.email.trim().is_empty() {
            Some("Email")
        } else {
            None
        }
    }

    /// Appends a trimmed skill. Blank input and exact duplicates are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Drops repeated skills, keeping the first occurrence of each.
    pub fn dedup_skills(&mut self) {
        self.skills = merge_skills(&self.skills, Vec::<String>::new());
    }

    pub fn remove_skill(&mut self, index: usize) -> Option<String> {
        (index < self.skills.len()).then(|| self.skills.remove(index))
    }

    /// The first `n` skills, joined for prose.
    pub fn top_skills(&self, n: usize) -> String {
        self.skills
            .iter()
            .take(n)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn assign_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = Uuid::new_v4().to_string();
    }
}

/// Appends `extra` to `base`, keeping only the first occurrence of each skill
/// (exact string match) in first-seen order.
pub fn merge_skills<I, S>(base: &[String], extra: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut merged: Vec<String> = Vec::with_capacity(base.len());
    for skill in base.iter().cloned().chain(extra.into_iter().map(Into::into)) {
        if !merged.contains(&skill) {
            merged.push(skill);
        }
    }
    merged
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_collections_become_empty() {
        let record: ResumeRecord = serde_json::from_value(json!({
            "personalInfo": { "fullName": "Jane", "email": "jane@example.com", "phone": null },
            "skills": null,
            "experience": [],
        }))
        .unwrap();

        assert!(record.skills.is_empty());
        assert!(record.education.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.certifications.is_empty());
        assert!(record.languages.is_empty());
        assert_eq!(record.personal_info.phone, "");
        assert_eq!(record.summary, "");
    }

    #[test]
    fn test_job_title_populates_position() {
        let mut record: ResumeRecord = serde_json::from_value(json!({
            "personalInfo": { "fullName": "Jane", "email": "j@e.com" },
            "experience": [
                { "company": "Acme", "jobTitle": "Engineer" },
                { "company": "Initech", "position": "Manager" }
            ]
        }))
        .unwrap();
        record.normalize();

        assert_eq!(record.experience[0].position, "Engineer");
        assert_eq!(record.experience[0].job_title, "Engineer");
        assert_eq!(record.experience[1].job_title, "Manager");
        assert!(!record.experience[0].id.is_empty());
        assert_ne!(record.experience[0].id, record.experience[1].id);
    }

    #[test]
    fn test_normalize_keeps_existing_ids() {
        let record = fixtures::sample_resume();
        assert_eq!(record.clone().normalized(), record);
    }

    #[test]
    fn test_current_role_renders_present() {
        let exp = Experience {
            start_date: "Jan 2020".to_string(),
            end_date: "Mar 2021".to_string(),
            current: true,
            ..Experience::default()
        };
        assert_eq!(exp.date_range(), "Jan 2020 - Present");
    }

    #[test]
    fn test_education_prefers_year_over_range() {
        let edu = Education {
            degree: "MSc".to_string(),
            start_date: "2014".to_string(),
            end_date: "2016".to_string(),
            year: "2016".to_string(),
            ..Education::default()
        };
        assert_eq!(edu.period(), "2016");
        assert_eq!(edu.heading(), "MSc");
    }

    #[test]
    fn test_merge_skills_keeps_first_seen_order() {
        let base = vec!["Java".to_string(), "SQL".to_string()];
        let merged = merge_skills(
            &base,
            ["Leadership", "Strategic Planning", "Problem Solving", "Java"],
        );
        assert_eq!(
            merged,
            vec![
                "Java",
                "SQL",
                "Leadership",
                "Strategic Planning",
                "Problem Solving"
            ]
        );
    }

    #[test]
    fn test_add_skill_rejects_blank_and_duplicates() {
        let mut record = fixtures::sample_resume();
        assert!(!record.add_skill("   "));
        assert!(!record.add_skill("Java"));
        assert!(record.add_skill("  Rust "));
        assert_eq!(record.skills.last().map(String::as_str), Some("Rust"));
        assert_eq!(record.remove_skill(0).as_deref(), Some("Java"));
        assert_eq!(record.remove_skill(10), None);
    }

    #[test]
    fn test_missing_required_reports_first_gap() {
        let mut record = fixtures::sample_resume();
        assert_eq!(record.missing_required(), None);
        record.personal_info.email.clear();
        assert_eq!(record.missing_required(), Some("Email"));
        record.personal_info.full_name = "  ".to_string();
        assert_eq!(record.missing_required(), Some("Full name"));
    }

    #[test]
    fn test_unexpected_fields_survive_round_trip() {
        let record: ResumeRecord = serde_json::from_value(json!({
            "personalInfo": { "fullName": "Jane", "email": "j@e.com" },
            "unexpectedFields": { "hobbies": ["chess"] }
        }))
        .unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["unexpectedFields"]["hobbies"][0], "chess");
    }
}
