use crate::models::CreatePollRequest;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_OPTION_LENGTH: usize = 100;
pub const MAX_OPTIONS: usize = 50;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Title exceeds maximum length of {MAX_TITLE_LENGTH}")]
    TitleTooLong,
    #[error("At least one option is required")]
    NoOptions,
    #[error("Too many options (maximum {MAX_OPTIONS})")]
    TooManyOptions,
    #[error("Empty option text")]
    EmptyOption,
    #[error("Option text exceeds maximum length of {MAX_OPTION_LENGTH}")]
    OptionTooLong,
}

/// Checks the shape rules of a new poll before it reaches the store.
///
/// Duplicate names and the choice limits are left alone: the store accepts
/// them as given.
pub fn validate_poll_request(request: &CreatePollRequest) -> Result<(), ValidationError> {
    if request.title.trim().is_empty() { return Err(ValidationError::EmptyTitle); }
    if request.title.chars().count() > MAX_TITLE_LENGTH { return Err(ValidationError::TitleTooLong); }
    if request.options.is_empty() { return Err(ValidationError::NoOptions); }
    if request.options.len() > MAX_OPTIONS { return Err(ValidationError::TooManyOptions); }

    if request.options.iter().any(|opt| opt.trim().is_empty()) { return Err(ValidationError::EmptyOption); }
    if request.options.iter().any(|opt| opt.chars().count() > MAX_OPTION_LENGTH) {
        return Err(ValidationError::OptionTooLong);
    }

    Ok(())
}
