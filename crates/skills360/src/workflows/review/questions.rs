//! Question catalog keyed on job profile.
//!
//! Catalog entries are templates: when an evaluation starts, each template is
//! snapshotted into an [`Answer`](super::domain::Answer) so later catalog
//! edits never alter past evaluations.

use super::domain::{Role, SkillCategory};

/// One catalog entry. `order` drives form display; `is_ai_skill` marks the
/// question as feeding the cross-cutting AI sub-score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTemplate {
    pub id: &'static str,
    pub category: SkillCategory,
    pub text: &'static str,
    pub is_ai_skill: bool,
    pub order: u8,
}

const fn q(
    id: &'static str,
    category: SkillCategory,
    text: &'static str,
    is_ai_skill: bool,
    order: u8,
) -> QuestionTemplate {
    QuestionTemplate {
        id,
        category,
        text,
        is_ai_skill,
        order,
    }
}

/// Full ordered questionnaire for one role: the shared soft-skills and
/// project-performance blocks plus the role's technical block.
pub fn questions_for_role(role: Role) -> Vec<QuestionTemplate> {
    let mut questions = Vec::new();
    questions.extend_from_slice(SOFT_SKILLS);
    questions.extend_from_slice(hard_skills(role));
    questions.extend_from_slice(PERFORMANCE_PROJECT);
    questions
}

fn hard_skills(role: Role) -> &'static [QuestionTemplate] {
    match role {
        Role::GraphicIntegrator => GRAPHIC_INTEGRATOR_HARD,
        Role::Developer => DEVELOPER_HARD,
        Role::TechLead => TECH_LEAD_HARD,
        Role::LeadDev => LEAD_DEV_HARD,
        Role::TechnicalReferent => TECHNICAL_REFERENT_HARD,
        Role::BusinessAnalyst => BUSINESS_ANALYST_HARD,
        Role::ProjectManager => PROJECT_MANAGER_HARD,
        Role::Pmo => PMO_HARD,
    }
}

use SkillCategory::{HardSkills, PerformanceProject, SoftSkills};

const SOFT_SKILLS: &[QuestionTemplate] = &[
    q(
        "soft-01",
        SoftSkills,
        "Communicates clearly with teammates and stakeholders",
        false,
        1,
    ),
    q(
        "soft-02",
        SoftSkills,
        "Works autonomously and knows when to ask for help",
        false,
        2,
    ),
    q(
        "soft-03",
        SoftSkills,
        "Collaborates constructively inside and across teams",
        false,
        3,
    ),
    q(
        "soft-04",
        SoftSkills,
        "Adapts to changing priorities and contexts",
        false,
        4,
    ),
    q(
        "soft-05",
        SoftSkills,
        "Gives and receives feedback in a constructive way",
        false,
        5,
    ),
    q(
        "soft-06",
        SoftSkills,
        "Shares knowledge and contributes to team rituals",
        false,
        6,
    ),
];

const PERFORMANCE_PROJECT: &[QuestionTemplate] = &[
    q(
        "perf-01",
        PerformanceProject,
        "Delivers commitments on time and flags risks early",
        false,
        21,
    ),
    q(
        "perf-02",
        PerformanceProject,
        "Produces deliverables meeting the expected quality bar",
        false,
        22,
    ),
    q(
        "perf-03",
        PerformanceProject,
        "Estimates workload realistically and manages time well",
        false,
        23,
    ),
    q(
        "perf-04",
        PerformanceProject,
        "Understands the business goals behind project tasks",
        false,
        24,
    ),
    q(
        "perf-05",
        PerformanceProject,
        "Uses AI assistance to speed up project delivery where it fits",
        true,
        25,
    ),
];

const GRAPHIC_INTEGRATOR_HARD: &[QuestionTemplate] = &[
    q(
        "gi-hard-01",
        HardSkills,
        "Integrates designs into pixel-accurate, accessible pages",
        false,
        11,
    ),
    q(
        "gi-hard-02",
        HardSkills,
        "Masters the HTML/CSS toolchain and responsive layouts",
        false,
        12,
    ),
    q(
        "gi-hard-03",
        HardSkills,
        "Keeps design systems and component libraries consistent",
        false,
        13,
    ),
    q(
        "gi-hard-04",
        HardSkills,
        "Uses generative AI tools to produce or adapt visual assets",
        true,
        14,
    ),
    q(
        "gi-hard-05",
        HardSkills,
        "Uses AI assistants to speed up integration work",
        true,
        15,
    ),
];

const DEVELOPER_HARD: &[QuestionTemplate] = &[
    q(
        "dev-hard-01",
        HardSkills,
        "Writes maintainable, well-tested code",
        false,
        11,
    ),
    q(
        "dev-hard-02",
        HardSkills,
        "Masters the team's languages, frameworks, and tooling",
        false,
        12,
    ),
    q(
        "dev-hard-03",
        HardSkills,
        "Designs sound technical solutions for the features owned",
        false,
        13,
    ),
    q(
        "dev-hard-04",
        HardSkills,
        "Uses AI coding assistants effectively day to day",
        true,
        14,
    ),
    q(
        "dev-hard-05",
        HardSkills,
        "Reviews and validates AI-generated code critically",
        true,
        15,
    ),
];

const TECH_LEAD_HARD: &[QuestionTemplate] = &[
    q(
        "tl-hard-01",
        HardSkills,
        "Sets and defends the technical direction of the team",
        false,
        11,
    ),
    q(
        "tl-hard-02",
        HardSkills,
        "Runs thorough, teaching-oriented code reviews",
        false,
        12,
    ),
    q(
        "tl-hard-03",
        HardSkills,
        "Arbitrates technical debt against delivery pressure",
        false,
        13,
    ),
    q(
        "tl-hard-04",
        HardSkills,
        "Evaluates AI tools and defines team usage guidelines",
        true,
        14,
    ),
    q(
        "tl-hard-05",
        HardSkills,
        "Coaches the team on productive AI-assisted workflows",
        true,
        15,
    ),
];

const LEAD_DEV_HARD: &[QuestionTemplate] = &[
    q(
        "ld-hard-01",
        HardSkills,
        "Leads the implementation of complex features end to end",
        false,
        11,
    ),
    q(
        "ld-hard-02",
        HardSkills,
        "Keeps the codebase architecture coherent as it grows",
        false,
        12,
    ),
    q(
        "ld-hard-03",
        HardSkills,
        "Unblocks other developers quickly and effectively",
        false,
        13,
    ),
    q(
        "ld-hard-04",
        HardSkills,
        "Integrates AI assistance into the team's build pipeline",
        true,
        14,
    ),
    q(
        "ld-hard-05",
        HardSkills,
        "Measures where AI tooling actually helps the team",
        true,
        15,
    ),
];

const TECHNICAL_REFERENT_HARD: &[QuestionTemplate] = &[
    q(
        "tr-hard-01",
        HardSkills,
        "Holds deep expertise in the domain the team relies on",
        false,
        11,
    ),
    q(
        "tr-hard-02",
        HardSkills,
        "Documents and transmits that expertise effectively",
        false,
        12,
    ),
    q(
        "tr-hard-03",
        HardSkills,
        "Stays ahead of the domain's technical evolutions",
        false,
        13,
    ),
    q(
        "tr-hard-04",
        HardSkills,
        "Uses AI tools to maintain and query the knowledge base",
        true,
        14,
    ),
    q(
        "tr-hard-05",
        HardSkills,
        "Assesses the reliability of AI answers in the domain",
        true,
        15,
    ),
];

const BUSINESS_ANALYST_HARD: &[QuestionTemplate] = &[
    q(
        "ba-hard-01",
        HardSkills,
        "Captures business needs into clear, testable requirements",
        false,
        11,
    ),
    q(
        "ba-hard-02",
        HardSkills,
        "Models processes and data flows accurately",
        false,
        12,
    ),
    q(
        "ba-hard-03",
        HardSkills,
        "Bridges business and technical stakeholders effectively",
        false,
        13,
    ),
    q(
        "ba-hard-04",
        HardSkills,
        "Uses AI tools for analysis and documentation tasks",
        true,
        14,
    ),
    q(
        "ba-hard-05",
        HardSkills,
        "Leverages AI to explore and summarize business data",
        true,
        15,
    ),
];

const PROJECT_MANAGER_HARD: &[QuestionTemplate] = &[
    q(
        "pm-hard-01",
        HardSkills,
        "Plans projects with realistic scope, budget, and staffing",
        false,
        11,
    ),
    q(
        "pm-hard-02",
        HardSkills,
        "Tracks progress and steers the project through risks",
        false,
        12,
    ),
    q(
        "pm-hard-03",
        HardSkills,
        "Keeps clients and sponsors informed and aligned",
        false,
        13,
    ),
    q(
        "pm-hard-04",
        HardSkills,
        "Uses AI tools for planning, reporting, and risk analysis",
        true,
        14,
    ),
    q(
        "pm-hard-05",
        HardSkills,
        "Automates recurring project communication with AI",
        true,
        15,
    ),
];

const PMO_HARD: &[QuestionTemplate] = &[
    q(
        "pmo-hard-01",
        HardSkills,
        "Maintains reliable portfolio-level indicators",
        false,
        11,
    ),
    q(
        "pmo-hard-02",
        HardSkills,
        "Standardizes project practices across teams",
        false,
        12,
    ),
    q(
        "pmo-hard-03",
        HardSkills,
        "Surfaces cross-project risks and dependencies early",
        false,
        13,
    ),
    q(
        "pmo-hard-04",
        HardSkills,
        "Uses AI tools for KPI analysis and reporting automation",
        true,
        14,
    ),
    q(
        "pmo-hard-05",
        HardSkills,
        "Evaluates AI-driven process optimization opportunities",
        true,
        15,
    ),
];
