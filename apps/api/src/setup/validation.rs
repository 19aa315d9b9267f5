use crate::errors::AppError;
use crate::models::interview::InterviewConfig;

/// Every free-text profile field must be filled in before a session starts.
/// The resume is optional.
pub fn validate_config(config: &InterviewConfig) -> Result<(), AppError> {
    let fields = [
        ("name", &config.name),
        ("branch", &config.branch),
        ("role", &config.role),
        ("experience_level", &config.experience_level),
        ("interest_field", &config.interest_field),
    ];

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
