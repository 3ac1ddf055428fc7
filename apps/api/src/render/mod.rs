//! Report presentation: the ordered section model and the export artifacts built on it.

pub mod export;

use serde::Serialize;

use crate::models::report::{CareerOption, LifePath, Report};

/// One display section of a report. `lines` are paragraphs; wrapping happens later.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    fn field(&mut self, label: &str, value: &str) -> &mut Self {
        self.lines.push(format!("{label}: {value}"));
        self
    }

    fn list(&mut self, label: &str, items: &[String]) -> &mut Self {
        self.lines.push(format!("{label}:"));
        self.lines.extend(items.iter().map(|item| format!("- {item}")));
        self
    }
}

/// Flattens a report into its fixed display order.
pub fn report_sections(report: &Report) -> Vec<ReportSection> {
    let profile = &report.core_profile;
    let mut core = ReportSection::new("Core Profile");
    core.field("Archetype", &profile.archetype)
        .field("Decision style", &profile.decision_style)
        .list("Strength drivers", &profile.strength_drivers)
        .list("Weakness patterns", &profile.weakness_patterns)
        .field("Hidden potential", &profile.hidden_potential)
        .field("Psychological profile", &profile.psychological_praise);

    let mut sync = ReportSection::new("Path A: Synchronization");
    career_options(&mut sync, &report.career_paths.sync_path);

    let mut pivot = ReportSection::new("Path B: The Pivot");
    career_options(&mut pivot, &report.career_paths.pivot_path);

    let edu = &report.education_strategy;
    let mut education = ReportSection::new("Education Strategy");
    education
        .field(
            "Formal education recommended",
            if edu.recommended { "Yes" } else { "No" },
        )
        .list("Global options", &edu.global_options)
        .list("Avant-garde alternatives", &edu.avant_garde_alternatives)
        .field("Duration", &edu.duration)
        .field("ROI reality check", &edu.roi_reality_check);

    let mut knowledge = ReportSection::new("Knowledge Awareness");
    for item in &report.knowledge_awareness {
        knowledge.field(&item.topic, &item.insight);
    }

    let ai = &report.ai_integration;
    let mut ai_section = ReportSection::new("AI Integration");
    ai_section
        .field("Multiplier strategy", &ai.multiplier_strategy)
        .list("Tools to use", &ai.tools_to_use)
        .list("Skills to learn", &ai.skills_to_learn)
        .field("Career impact", &ai.career_impact)
        .field("Workflow example", &ai.workflow_example);

    let imp = &report.improvements;
    let mut improvements = ReportSection::new("Improvements");
    improvements
        .list("Skill gaps", &imp.skill_gaps)
        .list("Mindset flaws", &imp.mindset_flaws)
        .list("Habits to break", &imp.habits_to_break)
        .field("Consequence of inaction", &imp.consequence_of_inaction)
        .field("Six-month focus", &imp.six_month_focus);

    let mut life = ReportSection::new("Life Paths");
    life_path(&mut life, "Safe / Stable", &report.life_paths.safe);
    life_path(&mut life, "High Growth", &report.life_paths.growth);
    life_path(&mut life, "Purpose Driven", &report.life_paths.purpose);

    let plan = &report.action_plan;
    let mut action = ReportSection::new("Action Plan");
    action
        .list("First 30 days", &plan.first_30_days)
        .list("Next 90 days", &plan.next_90_days)
        .list("6 months", &plan.six_months)
        .list("12 months", &plan.twelve_months);

    let verdict = &report.final_verdict;
    let mut final_verdict = ReportSection::new("Final Verdict");
    final_verdict
        .field("Trajectory", &verdict.trajectory)
        .field("Hard truth", &verdict.hard_truth)
        .field("Core advantage", &verdict.core_advantage)
        .field("Non-negotiable action", &verdict.non_negotiable_action);

    vec![
        core,
        sync,
        pivot,
        education,
        knowledge,
        ai_section,
        improvements,
        life,
        action,
        final_verdict,
    ]
}

fn career_options(section: &mut ReportSection, options: &[CareerOption]) {
    for option in options {
        section.lines.push(option.role_name.clone());
        section
            .field("Why it fits", &option.fit_reason)
            .field("Income potential", option.income_potential.label())
            .field("AI impact", option.ai_impact.label())
            .field("Risk", &option.risk_level)
            .field("Time to entry", &option.time_to_entry)
            .field("Skills", &option.required_skills.join(", "));
    }
}

fn life_path(section: &mut ReportSection, kind: &str, path: &LifePath) {
    section.lines.push(format!("{kind}: {}", path.name));
    section
        .field("Description", &path.description)
        .field("Lifestyle", &path.lifestyle)
        .field("Income range", &path.income_range)
        .field("Stress", &path.stress_level)
        .field("Long-term satisfaction", &path.long_term_satisfaction);
}
