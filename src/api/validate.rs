//! Identifier validation.
//!
//! The only gate between free-form path text and indexed access to the list.

use super::error::ApiError;
use crate::domain::TodoList;

/// Parses `segment` as a 1-based identifier into `list`.
///
/// # Errors
///
/// - [`ApiError::InvalidData`] if `segment` is not a base-10 integer or is
///   less than 1.
/// - [`ApiError::NotFound`] if it exceeds the list length.
pub fn validate_id(segment: &str, list: &TodoList) -> Result<usize, ApiError> {
    let id: i64 = segment
        .parse()
        .map_err(|error| ApiError::InvalidData(format!("Invalid ID: {error}")))?;

    if id < 1 {
        return Err(ApiError::InvalidData(
            "Invalid ID: Less than one".to_string(),
        ));
    }

    match usize::try_from(id) {
        Ok(id) if id <= list.len() => Ok(id),
        _ => Err(ApiError::NotFound(format!("ID {id} not found"))),
    }
}
