use super::RatingSource;
use crate::workflows::review::domain::{Answer, SkillCategory};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of the qualifying ratings mapped onto a 0-100 scale, 2 decimals.
/// An empty set scores 0 so an unanswered category never breaks aggregation.
fn scale_ratings(ratings: impl Iterator<Item = u8>) -> f64 {
    let (count, sum) = ratings.fold((0u32, 0u32), |(count, sum), rating| {
        (count + 1, sum + u32::from(rating))
    });
    if count == 0 {
        return 0.0;
    }
    round2(f64::from(sum) / f64::from(count) * 20.0)
}

/// Score for one category, judged on its own 100-point scale independent of
/// how many questions the category holds.
pub(crate) fn category_score(
    answers: &[Answer],
    category: SkillCategory,
    source: RatingSource,
) -> f64 {
    scale_ratings(
        answers
            .iter()
            .filter(|answer| answer.category == category)
            .filter_map(|answer| source.rating(answer)),
    )
}

/// Same rule over the cross-cutting AI-flagged subset, regardless of the
/// category each flagged question belongs to.
pub(crate) fn ai_competency_score(answers: &[Answer], source: RatingSource) -> f64 {
    scale_ratings(
        answers
            .iter()
            .filter(|answer| answer.is_ai_skill)
            .filter_map(|answer| source.rating(answer)),
    )
}
