//! Client-side checks run before a create/upgrade is handed to the program.
//!
//! The program enforces the same limits; these exist so a user gets an
//! immediate message instead of a failed simulation.

use thiserror::Error;

use crate::amount::{format_atom, parse_atom};

/// Maximum metadata length, in characters and in UTF-8 bytes.
pub const MAX_METADATA_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a burn amount")]
    EmptyAmount,

    #[error("Please enter a valid burn amount")]
    InvalidAmount,

    #[error("Please enter a valid burn amount greater than 0")]
    InvalidUpgradeAmount,

    #[error("Minimum burn amount is {} $ATOM", format_minimum(.minimum))]
    BelowMinimum { minimum: u64 },

    #[error("Metadata must be 200 characters or less")]
    MetadataTooLong { len: usize },

    #[error("You already have an AtomID")]
    IdentityExists,

    #[error("You need to create an AtomID first")]
    IdentityMissing,
}

fn format_minimum(minimum: &u64) -> String {
    format_atom(*minimum)
}

/// Burn amount for a new identity: parsed, positive and at least `minimum`.
pub fn validate_create_burn(input: &str, minimum: u64) -> Result<u64, ValidationError> {
    let amount = positive_burn(input)?;
    if amount < minimum {
        return Err(ValidationError::BelowMinimum { minimum });
    }
    Ok(amount)
}

/// Burn amount for an upgrade: parsed and positive.
pub fn validate_upgrade_burn(input: &str) -> Result<u64, ValidationError> {
    positive_burn(input).map_err(|e| match e {
        ValidationError::InvalidAmount => ValidationError::InvalidUpgradeAmount,
        other => other,
    })
}

fn positive_burn(input: &str) -> Result<u64, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyAmount);
    }
    match parse_atom(input) {
        Ok(0) | Err(_) => Err(ValidationError::InvalidAmount),
        Ok(amount) => Ok(amount),
    }
}

pub fn validate_metadata(metadata: &str) -> Result<(), ValidationError> {
    let chars = metadata.chars().count();
    if chars > MAX_METADATA_LEN || metadata.len() > MAX_METADATA_LEN {
        return Err(ValidationError::MetadataTooLong { len: chars });
    }
    Ok(())
}

/// Empty metadata is sent as `None`.
pub fn metadata_arg(metadata: &str) -> Option<String> {
    (!metadata.is_empty()).then(|| metadata.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::ATOM_UNIT;
    use assert_matches::assert_matches;

    const MIN: u64 = 1_000 * ATOM_UNIT;

    #[test]
    fn create_burn_checks() {
        assert_eq!(validate_create_burn("1000", MIN), Ok(MIN));
        assert_eq!(validate_create_burn("  ", MIN), Err(ValidationError::EmptyAmount));
        assert_eq!(validate_create_burn("abc", MIN), Err(ValidationError::InvalidAmount));
        assert_eq!(validate_create_burn("0", MIN), Err(ValidationError::InvalidAmount));
        assert_matches!(
            validate_create_burn("999.999999", MIN),
            Err(ValidationError::BelowMinimum { minimum }) if minimum == MIN
        );
    }

    #[test]
    fn below_minimum_message() {
        let err = validate_create_burn("10", MIN).unwrap_err();
        assert_eq!(err.to_string(), "Minimum burn amount is 1,000 $ATOM");
    }

    #[test]
    fn upgrade_has_no_minimum() {
        assert_eq!(validate_upgrade_burn("0.000001"), Ok(1));
        assert_eq!(validate_upgrade_burn("0.0000001"), Err(ValidationError::InvalidUpgradeAmount));
    }

    #[test]
    fn invalid_amount_messages_differ_per_form() {
        let create = validate_create_burn("abc", MIN).unwrap_err();
        let upgrade = validate_upgrade_burn("0").unwrap_err();
        assert_eq!(create.to_string(), "Please enter a valid burn amount");
        assert_eq!(upgrade.to_string(), "Please enter a valid burn amount greater than 0");
        assert_eq!(validate_upgrade_burn(""), Err(ValidationError::EmptyAmount));
    }

    #[test]
    fn metadata_limit() {
        assert!(validate_metadata("").is_ok());
        assert!(validate_metadata(&"a".repeat(200)).is_ok());
        assert_matches!(
            validate_metadata(&"a".repeat(201)),
            Err(ValidationError::MetadataTooLong { len: 201 })
        );
        // 100 chars but 300 bytes: over the on-chain byte budget.
        assert!(validate_metadata(&"\u{20ac}".repeat(100)).is_err());
    }

    #[test]
    fn empty_metadata_is_none() {
        assert_eq!(metadata_arg(""), None);
        assert_eq!(metadata_arg("I burn for truth").as_deref(), Some("I burn for truth"));
    }
}
