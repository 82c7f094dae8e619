use crate::infra::InMemoryEvaluationRepository;
use chrono::{Local, NaiveDate};
use clap::Args;
use skills360::error::AppError;
use skills360::workflows::review::narrative::fallback;
use skills360::workflows::review::{
    Collaborator, DisabledAnalyst, EvaluationEvent, EvaluationService, EvaluationView,
    NarrativeState, Role, Seniority, SkillCategory,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Employee identifier for the demo collaborator
    #[arg(long, default_value = "EMP001")]
    pub(crate) employee_id: String,
    /// Joining date (YYYY-MM-DD). Defaults to three years ago.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) joined_on: Option<NaiveDate>,
    /// Stop after validation, skipping the narrative analysis step.
    #[arg(long)]
    pub(crate) skip_narrative: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        employee_id,
        joined_on,
        skip_narrative,
    } = args;

    let joined_on = joined_on
        .unwrap_or_else(|| Local::now().date_naive() - chrono::Duration::days(365 * 3));

    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let service = EvaluationService::new(repository, Arc::new(DisabledAnalyst));

    println!("360-degree skills review demo");

    let collaborator = Collaborator {
        employee_id,
        first_name: "Ada".to_string(),
        last_name: "Martin".to_string(),
        role: Role::Developer,
        seniority: Seniority::Confirmed,
        joined_on,
        last_evaluation_on: None,
    };

    let evaluation = match service.start(collaborator) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            println!("  Evaluation rejected: {err}");
            return Ok(());
        }
    };

    println!(
        "- Started evaluation {} for {} {} ({})",
        evaluation.id.0,
        evaluation.collaborator.first_name,
        evaluation.collaborator.last_name,
        evaluation.collaborator.role.label()
    );
    for category in [
        SkillCategory::SoftSkills,
        SkillCategory::HardSkills,
        SkillCategory::PerformanceProject,
    ] {
        let count = evaluation
            .answers
            .iter()
            .filter(|answer| answer.category == category)
            .count();
        println!("  - {count} questions in {category:?}");
    }

    // Self-assessment with a varied rating pattern.
    let ratings = [5u8, 4, 3, 4, 5];
    let mut current = evaluation.clone();
    for (index, answer) in evaluation.answers.iter().enumerate() {
        let event = EvaluationEvent::SelfRated {
            answer_id: answer.id.clone(),
            rating: ratings[index % ratings.len()],
            comment: None,
        };
        current = match service.record_event(&evaluation.id, event) {
            Ok(next) => next,
            Err(err) => {
                println!("  Self-assessment failed: {err}");
                return Ok(());
            }
        };
    }
    println!(
        "- Self-assessment complete: total {:.2} | AI {:.2} ({})",
        current.scores.self_assessment.total,
        current.scores.self_assessment.ai_competencies,
        current.scores.self_assessment.ai_level.label()
    );

    for event in [
        EvaluationEvent::CollaboratorCommented {
            text: "A demanding but rewarding year.".to_string(),
        },
        EvaluationEvent::Submitted {
            at: chrono::Utc::now(),
        },
    ] {
        current = match service.record_event(&evaluation.id, event) {
            Ok(next) => next,
            Err(err) => {
                println!("  Submission failed: {err}");
                return Ok(());
            }
        };
    }
    println!("- Submitted for manager review");

    // Manager review, slightly stricter than the self-assessment.
    for (index, answer) in evaluation.answers.iter().enumerate() {
        let event = EvaluationEvent::ManagerRated {
            answer_id: answer.id.clone(),
            rating: ratings[(index + 1) % ratings.len()],
            comment: None,
        };
        current = match service.record_event(&evaluation.id, event) {
            Ok(next) => next,
            Err(err) => {
                println!("  Manager review failed: {err}");
                return Ok(());
            }
        };
    }

    for event in [
        EvaluationEvent::ManagerCommented {
            text: "Consistent delivery, growing autonomy.".to_string(),
        },
        EvaluationEvent::Validated {
            at: chrono::Utc::now(),
        },
    ] {
        current = match service.record_event(&evaluation.id, event) {
            Ok(next) => next,
            Err(err) => {
                println!("  Validation failed: {err}");
                return Ok(());
            }
        };
    }

    match &current.scores.manager_assessment {
        Some(manager) => println!(
            "- Validated: manager total {:.2} vs self total {:.2}",
            manager.total, current.scores.self_assessment.total
        ),
        None => println!("- Validated without manager scores"),
    }

    if !skip_narrative {
        current = match service.generate_narrative(&evaluation.id).await {
            Ok(next) => next,
            Err(err) => {
                println!("  Narrative generation failed: {err}");
                return Ok(());
            }
        };
        if let NarrativeState::Ready { analysis, .. } = &current.narrative {
            println!("\nNarrative analysis");
            for strength in &analysis.strengths {
                println!("  + {strength}");
            }
            for area in &analysis.improvement_areas {
                println!("  - {area}");
            }
            println!("  {}", analysis.detailed_narrative);
        }

        let recommendation = fallback::recommendations(
            current.collaborator.role,
            &current.scores.self_assessment,
        );
        println!("\n{}", recommendation.title);
        println!("{}", recommendation.description);
        println!("Suggested tools: {}", recommendation.tools.join(", "));
        println!("Progression plan:");
        for step in &recommendation.progression_plan {
            println!("  - {step}");
        }
    }

    let view = EvaluationView::from_evaluation(&current);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("\nFinal evaluation payload:\n{json}"),
        Err(err) => println!("\nFinal evaluation payload unavailable: {err}"),
    }

    Ok(())
}
