use crate::error::AppError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a contest or submission description/note (at most 1MB).
pub fn validate_text_block(text: &str, what: &str) -> Result<(), AppError> {
    if text.len() > 1_000_000 {
        return Err(AppError::Validation(format!("{what} must be at most 1MB")));
    }
    Ok(())
}
