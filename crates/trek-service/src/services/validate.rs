//! Small input guards shared by the services

use trek_core::DomainError;

use super::error::ServiceResult;

/// Reject blank strings, returning the trimmed value otherwise
pub(crate) fn non_blank(value: &str, what: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{what} is blank")).into());
    }
    Ok(trimmed.to_string())
}
