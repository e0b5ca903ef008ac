//! Deterministic stand-ins returned when a backend call fails.
//! Each one has exactly the shape of a real success response.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::Utc;

use crate::models::{
    merge_skills, EnhancementResult, FeedbackResult, Recommendations, ResumeRecord,
    TemplateDescriptor,
};

pub const FALLBACK_ATS_SCORE: u8 = 75;

pub const BONUS_SKILLS: [&str; 3] = ["Leadership", "Strategic Planning", "Problem Solving"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rewrites the summary around the top three skills and appends the bonus skills.
pub fn mock_enhancement(original: &ResumeRecord) -> EnhancementResult {
    let top = original.top_skills(3);
    let summary = if original.summary.trim().is_empty() {
        format!(
            "Dynamic professional with extensive experience in {top} and a track record of delivering exceptional results."
        )
    } else {
        format!(
            "Results-driven professional with proven expertise in {top}. {}",
            original.summary
        )
    };

    let enhanced = ResumeRecord {
        summary,
        skills: merge_skills(&original.skills, BONUS_SKILLS),
        ..original.clone()
    };

    EnhancementResult {
        original_resume: original.clone(),
        enhanced_resume: enhanced,
        improvements: strings(&[
            "Enhanced professional summary with industry keywords",
            "Optimized skills section for ATS compatibility",
            "Improved action verbs and quantifiable achievements",
            "Added relevant technical competencies",
        ]),
        ai_suggestions: strings(&[
            "Consider adding specific metrics and numbers to quantify your achievements",
            "Include relevant certifications or training programs",
            "Tailor keywords to match your target job descriptions",
        ]),
    }
}

pub fn mock_feedback() -> FeedbackResult {
    FeedbackResult {
        ats_score: FALLBACK_ATS_SCORE,
        missing_skills: strings(&["Docker", "Kubernetes", "AWS", "CI/CD"]),
        keyword_density: BTreeMap::from([
            ("communication".to_string(), 1.8),
            ("development".to_string(), 2.4),
            ("leadership".to_string(), 1.2),
            ("management".to_string(), 2.1),
            ("project".to_string(), 3.0),
            ("team".to_string(), 2.7),
        ]),
        suggestions: strings(&[
            "Add more industry-specific keywords from the job description",
            "Quantify achievements with numbers and percentages",
            "Use standard section headings such as Experience and Education",
        ]),
        format_issues: strings(&["Avoid tables and multi-column layouts"]),
        match_percentage: 68,
        recommendations: Recommendations {
            skills: strings(&[
                "List cloud and container technologies you have used",
                "Group skills by category",
            ]),
            experience: strings(&[
                "Start each bullet point with a strong action verb",
                "Include measurable outcomes for each role",
            ]),
            education: strings(&["Add relevant coursework or certifications"]),
            formatting: strings(&[
                "Keep the resume to one or two pages",
                "Use a consistent date format",
            ]),
        },
    }
}

/// Built-in catalog used when the template listing is unavailable.
pub fn default_templates() -> Vec<TemplateDescriptor> {
    vec![
        TemplateDescriptor::new(
            "minimalist",
            "Minimalist",
            "Clean and simple design focusing on content with elegant spacing and typography",
            "/assets/templates/minimalist-preview.png",
        ),
        TemplateDescriptor::new(
            "modern-professional",
            "Modern Professional",
            "Contemporary design with accent colors, visual hierarchy, and modern layout elements",
            "/assets/templates/modern-professional-preview.png",
        ),
        TemplateDescriptor::new(
            "traditional",
            "Traditional",
            "Classic format preferred by traditional industries and conservative recruiters",
            "/assets/templates/traditional-preview.png",
        ),
        TemplateDescriptor::new(
            "creative",
            "Creative",
            "Innovative design with unique layout elements for creative professionals",
            "/assets/templates/creative-preview.png",
        ),
        TemplateDescriptor::new(
            "executive",
            "Executive",
            "Professional executive format with emphasis on leadership and achievements",
            "/assets/templates/executive-preview.png",
        ),
    ]
}

/// Text blob that stands in for a Word export. No backend renders Word yet.
pub fn word_placeholder(record: &ResumeRecord, template_id: &str) -> Bytes {
    let name = display_name(record);
    let mut text = format!(
        "{name} - Resume (Word format)\nTemplate: {template_id}\nGenerated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );
    if !record.personal_info.email.is_empty() {
        text.push_str(&format!("Email: {}\n", record.personal_info.email));
    }
    if !record.summary.is_empty() {
        text.push_str(&format!("\n{}\n", record.summary));
    }
    if !record.skills.is_empty() {
        text.push_str(&format!("\nSkills: {}\n", record.skills.join(", ")));
    }
    text.push_str("\nWord export is not available yet. Download the PDF for the formatted resume.\n");
    Bytes::from(text)
}

pub(crate) fn display_name(record: &ResumeRecord) -> &str {
    let name = record.personal_info.full_name.trim();
    if name.is_empty() {
        "Resume"
    } else {
        name
    }
}
