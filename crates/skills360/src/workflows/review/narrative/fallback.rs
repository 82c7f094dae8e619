//! Deterministic rule-based analysis, used whenever the external backend is
//! unavailable. Thresholds: a category at or above 80 is a strength, below
//! 60 an improvement area with a matching priority recommendation.

use serde::Serialize;

use super::CompetencyAnalysis;
use crate::workflows::review::domain::{AiLevel, Role, ScoreDetail};

/// Role-tailored tool suggestions paired with the progression plan, for
/// report rendering alongside the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolRecommendation {
    pub title: String,
    pub description: String,
    pub tools: Vec<&'static str>,
    pub progression_plan: Vec<String>,
}

pub fn default_analysis(scores: &ScoreDetail) -> CompetencyAnalysis {
    let mut strengths = Vec::new();
    let mut improvement_areas = Vec::new();
    let mut priority_recommendations = Vec::new();

    if scores.soft_skills >= 80.0 {
        strengths.push("Exceptional soft skills".to_string());
    }
    if scores.hard_skills >= 80.0 {
        strengths.push("Expert-level technical skills".to_string());
    }
    if scores.performance_project >= 80.0 {
        strengths.push("Remarkable project performance".to_string());
    }
    if scores.ai_competencies >= 80.0 {
        strengths.push("Advanced command of AI tooling".to_string());
    }

    if scores.soft_skills < 60.0 {
        improvement_areas.push("Soft skills".to_string());
        priority_recommendations
            .push("Work on communication, autonomy, and collaboration".to_string());
    }
    if scores.hard_skills < 60.0 {
        improvement_areas.push("Technical skills".to_string());
        priority_recommendations
            .push("Strengthen the technical skills the role requires".to_string());
    }
    if scores.performance_project < 60.0 {
        improvement_areas.push("Project performance".to_string());
        priority_recommendations
            .push("Improve time management and deliverable quality".to_string());
    }
    if scores.ai_competencies < 60.0 {
        improvement_areas.push("AI competencies".to_string());
        priority_recommendations
            .push("Discover and practice the AI tools relevant to the role".to_string());
    }

    if improvement_areas.is_empty() {
        priority_recommendations
            .push("Keep up the current level of excellence and share your expertise".to_string());
    }

    let detailed_narrative = format!(
        "Overall score of {:.1}% with an AI proficiency level of {}. \
         This summary was derived from score thresholds alone; request an \
         AI-assisted analysis for a narrative grounded in the written comments.",
        scores.total,
        scores.ai_level.label(),
    );

    CompetencyAnalysis {
        strengths,
        improvement_areas,
        priority_recommendations,
        progression_plan: progression_plan(scores.ai_level),
        detailed_narrative,
    }
}

pub fn recommendations(role: Role, scores: &ScoreDetail) -> ToolRecommendation {
    let (title, description) = match scores.ai_level {
        AiLevel::Beginner => (
            "Discovering AI tools",
            "You are starting your journey with AI. Begin with the core tools for \
             your role and get familiar with their main capabilities.",
        ),
        AiLevel::Intermediate => (
            "Growing AI skills",
            "You have a solid base. Deepen your skills and optimize how AI tools \
             fit into your daily work.",
        ),
        AiLevel::Advanced => (
            "Advanced AI mastery",
            "You master AI tooling well. You can now shape team practices and \
             train other team members.",
        ),
        AiLevel::Expert => (
            "Recognized AI expertise",
            "You are a recognized AI expert. You can lead strategic initiatives \
             and drive AI innovation across the organization.",
        ),
    };

    ToolRecommendation {
        title: title.to_string(),
        description: description.to_string(),
        tools: recommended_tools(role).to_vec(),
        progression_plan: progression_plan(scores.ai_level),
    }
}

pub fn progression_plan(level: AiLevel) -> Vec<String> {
    let steps: &[&str] = match level {
        AiLevel::Beginner => &[
            "Discover the core AI tools for your role (1-2 months)",
            "Follow introductory training on AI assistants (2-3 months)",
            "Experiment on personal or low-stakes projects (3-4 months)",
            "Fold AI gradually into your daily workflow (4-6 months)",
            "Share what you learned with the team (6 months)",
        ],
        AiLevel::Intermediate => &[
            "Deepen mastery of the tools you already use (1-2 months)",
            "Explore advanced features and techniques (2-3 months)",
            "Optimize your prompts and workflows (3-4 months)",
            "Help define the team's AI practices (4-5 months)",
            "Train other team members (5-6 months)",
        ],
        AiLevel::Advanced => &[
            "Track emerging AI tools in your domain (1-2 months)",
            "Experiment with advanced AI integrations (2-3 months)",
            "Define AI usage standards and guidelines (3-4 months)",
            "Lead AI adoption initiatives in the organization (4-6 months)",
            "Contribute to the company AI strategy (6-12 months)",
        ],
        AiLevel::Expert => &[
            "Continuous watch on AI developments (ongoing)",
            "Evaluate and select new AI tools (1-2 months)",
            "Train and mentor teams on AI (ongoing)",
            "Prototype novel AI applications (ongoing)",
            "Shape the strategic AI roadmap (ongoing)",
        ],
    };
    steps.iter().map(|step| (*step).to_string()).collect()
}

fn recommended_tools(role: Role) -> &'static [&'static str] {
    match role {
        Role::GraphicIntegrator => &[
            "Midjourney",
            "DALL-E",
            "Stable Diffusion",
            "GitHub Copilot",
            "Cursor",
            "Figma AI plugins",
        ],
        Role::Developer => &[
            "GitHub Copilot",
            "Cursor",
            "Tabnine",
            "Amazon CodeWhisperer",
            "ChatGPT",
            "Claude",
        ],
        Role::TechLead => &[
            "GitHub Copilot",
            "ChatGPT",
            "Claude",
            "Hugging Face",
            "Code review AI tools",
            "Documentation AI tools",
        ],
        Role::LeadDev => &[
            "GitHub Copilot",
            "ChatGPT",
            "Claude",
            "Project management AI",
            "Code analysis AI",
            "Team productivity AI",
        ],
        Role::TechnicalReferent => &[
            "ChatGPT",
            "Claude",
            "Specialized domain AI tools",
            "Documentation AI",
            "Knowledge base AI",
        ],
        Role::BusinessAnalyst => &[
            "ChatGPT",
            "Claude",
            "Data analysis AI tools",
            "Documentation AI",
            "UML generation AI",
            "Process optimization AI",
        ],
        Role::ProjectManager => &[
            "ChatGPT",
            "Claude",
            "Project planning AI",
            "Risk analysis AI",
            "Reporting AI",
            "Communication AI tools",
        ],
        Role::Pmo => &[
            "ChatGPT",
            "Claude",
            "Portfolio management AI",
            "KPI analysis AI",
            "Reporting automation AI",
            "Process optimization AI",
        ],
    }
}
