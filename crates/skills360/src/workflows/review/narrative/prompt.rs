use std::fmt::Write as _;

use crate::workflows::review::domain::{Answer, Evaluation, ScoreDetail, SkillCategory};

/// Build the analysis prompt: collaborator context, every question with its
/// rating and comment grouped by category plus the AI-flagged subset, and
/// strict-JSON output instructions.
pub(super) fn build_prompt(evaluation: &Evaluation, scores: &ScoreDetail) -> String {
    let collaborator = &evaluation.collaborator;

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an expert in skills assessment and professional development.\n\
         Analyse this 360-degree evaluation and produce a detailed analysis in strict JSON.\n\n\
         **Collaborator context:**\n\
         - Role: {role}\n\
         - Seniority: {seniority}\n\
         - Total score: {total:.1}%\n\
         - Soft skills: {soft:.1}%\n\
         - Hard skills: {hard:.1}%\n\
         - Project performance: {perf:.1}%\n\
         - AI competencies: {ai:.1}%\n\
         - AI proficiency level: {level}",
        role = collaborator.role.label(),
        seniority = collaborator.seniority.label(),
        total = scores.total,
        soft = scores.soft_skills,
        hard = scores.hard_skills,
        perf = scores.performance_project,
        ai = scores.ai_competencies,
        level = scores.ai_level.label(),
    );

    for category in [
        SkillCategory::SoftSkills,
        SkillCategory::HardSkills,
        SkillCategory::PerformanceProject,
    ] {
        let answers: Vec<&Answer> = evaluation
            .answers
            .iter()
            .filter(|answer| answer.category == category)
            .collect();
        push_section(&mut prompt, category.label(), &answers);
    }

    let ai_answers: Vec<&Answer> = evaluation
        .answers
        .iter()
        .filter(|answer| answer.is_ai_skill)
        .collect();
    push_section(&mut prompt, "AI Competencies", &ai_answers);

    if let Some(comment) = evaluation
        .final_comments
        .collaborator
        .as_deref()
        .filter(|text| !text.is_empty())
    {
        let _ = writeln!(prompt, "\n**Collaborator closing comment:**\n{comment}");
    }

    prompt.push_str(
        "\n**Instructions:**\n\
         Produce a complete analysis as a JSON object with these fields:\n\
         {\n\
           \"strengths\": [\"...\"],                 // 3-5 specific, concrete strengths\n\
           \"improvement_areas\": [\"...\"],         // 3-5 prioritized, actionable areas\n\
           \"priority_recommendations\": [\"...\"],  // 3-5 concrete recommendations\n\
           \"progression_plan\": [\"...\"],          // 6-12 month plan, adapted to the AI level\n\
           \"detailed_narrative\": \"...\"           // 2-3 paragraphs on strengths, gaps, opportunities\n\
         }\n\
         Be specific; tailor recommendations to the role and seniority; weigh every\n\
         per-question comment and the closing comment when identifying strengths,\n\
         difficulties, and training needs. Address the collaborator directly in a\n\
         professional, constructive tone.\n\
         Reply ONLY with the JSON object, no text before or after.",
    );

    prompt
}

fn push_section(prompt: &mut String, title: &str, answers: &[&Answer]) {
    let _ = writeln!(prompt, "\n**{title}:**");
    for (index, answer) in answers.iter().enumerate() {
        let _ = write!(
            prompt,
            "{}. {} - Rating: {}/5",
            index + 1,
            answer.text,
            answer.self_rating
        );
        match answer.self_comment.as_deref().filter(|c| !c.is_empty()) {
            Some(comment) => {
                let _ = writeln!(prompt, " - Comment: {comment}");
            }
            None => prompt.push('\n'),
        }
    }
}
