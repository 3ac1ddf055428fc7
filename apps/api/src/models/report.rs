//! The life strategy report. Produced once per completed interview, immutable afterwards.
//!
//! Every field is mandatory. None of these types use `Option` or `#[serde(default)]`,
//! so a payload missing any key fails deserialization as a whole, and the derived
//! JSON schema marks every property as required.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub core_profile: CoreProfile,
    pub career_paths: CareerPaths,
    pub education_strategy: EducationStrategy,
    pub knowledge_awareness: Vec<KnowledgeInsight>,
    pub ai_integration: AiIntegration,
    pub improvements: Improvements,
    pub life_paths: LifePaths,
    pub action_plan: ActionPlan,
    pub final_verdict: FinalVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoreProfile {
    pub archetype: String,
    pub decision_style: String,
    pub strength_drivers: Vec<String>,
    pub weakness_patterns: Vec<String>,
    pub hidden_potential: String,
    pub psychological_praise: String,
}

/// Two parallel tracks: the current trajectory amplified, and the lateral pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareerPaths {
    pub sync_path: Vec<CareerOption>,
    pub pivot_path: Vec<CareerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareerOption {
    pub role_name: String,
    pub fit_reason: String,
    pub required_skills: Vec<String>,
    pub time_to_entry: String,
    pub income_potential: IncomePotential,
    /// Free text; the model phrases risk however it likes.
    pub risk_level: String,
    pub ai_impact: AiImpact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum IncomePotential {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AiImpact {
    Safe,
    Enhanced,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl IncomePotential {
    pub fn label(&self) -> &'static str {
        match self {
            IncomePotential::Low => "Low",
            IncomePotential::Medium => "Medium",
            IncomePotential::High => "High",
        }
    }
}

impl AiImpact {
    pub fn label(&self) -> &'static str {
        match self {
            AiImpact::Safe => "Safe",
            AiImpact::Enhanced => "Enhanced",
            AiImpact::AtRisk => "At Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationStrategy {
    pub recommended: bool,
    pub global_options: Vec<String>,
    pub avant_garde_alternatives: Vec<String>,
    pub duration: String,
    pub roi_reality_check: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeInsight {
    pub topic: String,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiIntegration {
    pub multiplier_strategy: String,
    pub tools_to_use: Vec<String>,
    pub skills_to_learn: Vec<String>,
    pub career_impact: String,
    pub workflow_example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Improvements {
    pub skill_gaps: Vec<String>,
    pub mindset_flaws: Vec<String>,
    pub habits_to_break: Vec<String>,
    pub consequence_of_inaction: String,
    pub six_month_focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LifePaths {
    pub safe: LifePath,
    pub growth: LifePath,
    pub purpose: LifePath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifePath {
    pub name: String,
    pub description: String,
    pub lifestyle: String,
    pub income_range: String,
    pub stress_level: String,
    pub long_term_satisfaction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionPlan {
    #[serde(rename = "first30Days")]
    pub first_30_days: Vec<String>,
    #[serde(rename = "next90Days")]
    pub next_90_days: Vec<String>,
    #[serde(rename = "sixMonths")]
    pub six_months: Vec<String>,
    #[serde(rename = "twelveMonths")]
    pub twelve_months: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalVerdict {
    pub trajectory: String,
    pub hard_truth: String,
    pub core_advantage: String,
    pub non_negotiable_action: String,
}

/// A fully populated report used across test modules.
#[cfg(test)]
pub fn sample_report() -> Report {
    let option = |role: &str, income, ai| CareerOption {
        role_name: role.to_string(),
        fit_reason: format!("{role} uses the pattern recognition you described"),
        required_skills: vec!["Statistics".to_string(), "Rust".to_string()],
        time_to_entry: "9-12 months".to_string(),
        income_potential: income,
        risk_level: "Moderate".to_string(),
        ai_impact: ai,
    };
    let path = |name: &str| LifePath {
        name: name.to_string(),
        description: format!("{name} description"),
        lifestyle: "Quiet mornings, deep work".to_string(),
        income_range: "$80k-$140k".to_string(),
        stress_level: "Medium".to_string(),
        long_term_satisfaction: "High".to_string(),
    };

    Report {
        core_profile: CoreProfile {
            archetype: "The Reluctant Systems Thinker".to_string(),
            decision_style: "Slow to commit, fast to execute".to_string(),
            strength_drivers: vec!["Pattern recognition".to_string()],
            weakness_patterns: vec!["Waits for permission".to_string()],
            hidden_potential: "Mechanism design".to_string(),
            psychological_praise: "High need for cognition paired with low ego".to_string(),
        },
        career_paths: CareerPaths {
            sync_path: vec![option("Quant Analyst", IncomePotential::High, AiImpact::Enhanced)],
            pivot_path: vec![option(
                "Computational Botanist",
                IncomePotential::Medium,
                AiImpact::Safe,
            )],
        },
        education_strategy: EducationStrategy {
            recommended: false,
            global_options: vec!["ETH Zurich summer school".to_string()],
            avant_garde_alternatives: vec!["Autodidact roadmap in cryptography".to_string()],
            duration: "6 months".to_string(),
            roi_reality_check: "A degree would cost more than it returns".to_string(),
        },
        knowledge_awareness: vec![KnowledgeInsight {
            topic: "Mechanism Design".to_string(),
            insight: "Your frustrations are incentive problems".to_string(),
        }],
        ai_integration: AiIntegration {
            multiplier_strategy: "Automate the analysis, keep the judgment".to_string(),
            tools_to_use: vec!["Notebook agents".to_string()],
            skills_to_learn: vec!["Prompt evaluation".to_string()],
            career_impact: "Doubles output within a year".to_string(),
            workflow_example: "Draft with a model, verify by hand".to_string(),
        },
        improvements: Improvements {
            skill_gaps: vec!["Public writing".to_string()],
            mindset_flaws: vec!["Perfectionism".to_string()],
            habits_to_break: vec!["Late-night doomscrolling".to_string()],
            consequence_of_inaction: "Another five years in the same seat".to_string(),
            six_month_focus: "Ship one public project".to_string(),
        },
        life_paths: LifePaths {
            safe: path("Safe"),
            growth: path("Growth"),
            purpose: path("Purpose"),
        },
        action_plan: ActionPlan {
            first_30_days: vec!["Write down three unfair advantages".to_string()],
            next_90_days: vec!["Publish one analysis".to_string()],
            six_months: vec!["Land one paid project".to_string()],
            twelve_months: vec!["Transition roles".to_string()],
        },
        final_verdict: FinalVerdict {
            trajectory: "Upward, if you stop waiting".to_string(),
            hard_truth: "Nobody is coming to pick you".to_string(),
            core_advantage: "You see systems others miss".to_string(),
            non_negotiable_action: "Ship something public in 30 days".to_string(),
        },
    }
}
