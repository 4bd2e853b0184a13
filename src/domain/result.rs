//! Result type alias for gdpr-export

use super::errors::GdprError;

/// Result type alias for gdpr-export operations
///
/// # Examples
///
/// ```
/// use gdpr_export::domain::result::Result;
/// use gdpr_export::domain::errors::GdprError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GdprError::Other("nothing to export".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GdprError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RegistrationError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_from_registration_error() {
        fn inner() -> Result<()> {
            Err(RegistrationError::EmptyEntityType)?
        }

        assert!(inner().is_err());
    }
}
