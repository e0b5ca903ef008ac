use serde::{Deserialize, Serialize};

/// The six screens of the wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    Upload,
    Preview,
    Templates,
    Enhance,
    AtsScore,
    Download,
}

/// Result of navigating to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Ready,
    Redirect(WizardStep),
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Upload,
        WizardStep::Preview,
        WizardStep::Templates,
        WizardStep::Enhance,
        WizardStep::AtsScore,
        WizardStep::Download,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Upload => 0,
            WizardStep::Preview => 1,
            WizardStep::Templates => 2,
            WizardStep::Enhance => 3,
            WizardStep::AtsScore => 4,
            WizardStep::Download => 5,
        }
    }

    /// The following step. Download is terminal.
    pub fn next(&self) -> WizardStep {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(WizardStep::Download)
    }

    /// The preceding step. Upload is first.
    pub fn previous(&self) -> WizardStep {
        self.index()
            .checked_sub(1)
            .map(|i| Self::ALL[i])
            .unwrap_or(WizardStep::Upload)
    }

    pub fn path(&self) -> &'static str {
        match self {
            WizardStep::Upload => "/upload",
            WizardStep::Preview => "/preview",
            WizardStep::Templates => "/templates",
            WizardStep::Enhance => "/enhance",
            WizardStep::AtsScore => "/ats-score",
            WizardStep::Download => "/download",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload Resume",
            WizardStep::Preview => "Review & Edit",
            WizardStep::Templates => "Choose Template",
            WizardStep::Enhance => "AI Enhancement",
            WizardStep::AtsScore => "ATS Score",
            WizardStep::Download => "Download",
        }
    }

    pub fn requires_resume(&self) -> bool {
        !matches!(self, WizardStep::Upload)
    }

    pub fn requires_template(&self) -> bool {
        matches!(self, WizardStep::Download)
    }
}
