use crate::workflows::review::domain::Answer;

/// Share of answers carrying a self rating, as a whole percentage.
/// An evaluation with zero questions reports 0 rather than dividing by zero.
pub fn progress_percent(answers: &[Answer]) -> u8 {
    if answers.is_empty() {
        return 0;
    }
    let rated = answers.iter().filter(|a| a.is_self_rated()).count();
    ((rated as f64 / answers.len() as f64) * 100.0).round() as u8
}

/// True iff every answer has a self rating in [1, 5]. An empty answer list
/// is vacuously complete; gating an evaluation with zero questions is the
/// caller's concern.
pub fn is_self_complete(answers: &[Answer]) -> bool {
    answers.iter().all(Answer::is_self_rated)
}

/// True iff every answer has a manager rating in [1, 5]. Same vacuous-truth
/// boundary as the self-track predicate.
pub fn is_manager_complete(answers: &[Answer]) -> bool {
    answers.iter().all(Answer::is_manager_rated)
}
