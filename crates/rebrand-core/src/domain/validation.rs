use crate::domain::{error::DomainError, spec::InitSpec};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_init_spec(spec: &InitSpec) -> Result<(), DomainError> {
        spec.validate()
    }
}
