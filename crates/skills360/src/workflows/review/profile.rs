use chrono::{Months, NaiveDate};

use super::domain::Collaborator;

/// Minimum spacing between two evaluations of the same employee.
pub const EVALUATION_SPACING_MONTHS: u32 = 10;

/// Rejections raised while admitting a collaborator profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileViolation {
    #[error("employee id must be non-empty and alphanumeric")]
    InvalidEmployeeId,
    #[error("{field} must be at least 2 letters (spaces, hyphens, apostrophes allowed)")]
    InvalidName { field: &'static str },
    #[error("joining date must be in the past")]
    JoinDateNotInPast,
    #[error(
        "an evaluation already exists for this employee within the last \
         {EVALUATION_SPACING_MONTHS} months"
    )]
    RecentEvaluationExists,
}

/// Validate the shape of a profile before an evaluation is created. The
/// spacing rule needs repository access and lives in the service layer.
pub fn validate_profile(
    collaborator: &Collaborator,
    today: NaiveDate,
) -> Result<(), ProfileViolation> {
    if collaborator.employee_id.is_empty()
        || !collaborator
            .employee_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ProfileViolation::InvalidEmployeeId);
    }

    check_name(&collaborator.first_name, "first name")?;
    check_name(&collaborator.last_name, "last name")?;

    if collaborator.joined_on >= today {
        return Err(ProfileViolation::JoinDateNotInPast);
    }

    Ok(())
}

/// True when `previous` falls inside the spacing window ending at `today`.
pub fn within_spacing_window(previous: NaiveDate, today: NaiveDate) -> bool {
    match previous.checked_add_months(Months::new(EVALUATION_SPACING_MONTHS)) {
        Some(threshold) => today < threshold,
        None => true,
    }
}

fn check_name(value: &str, field: &'static str) -> Result<(), ProfileViolation> {
    let letters = value.chars().filter(|c| c.is_alphabetic()).count();
    let shape_ok = value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
    if letters >= 2 && shape_ok {
        Ok(())
    } else {
        Err(ProfileViolation::InvalidName { field })
    }
}
