//! Pure validation for product payloads.

use super::error::ValidationError;
use super::requests::ProductPayload;

/// Minimum product name length, in characters.
pub const NAME_MIN_LEN: usize = 3;
/// Maximum product name length, in characters.
pub const NAME_MAX_LEN: usize = 50;

/// Validates a payload before it is turned into a stored product.
pub fn validate_payload(payload: &ProductPayload) -> Result<(), ValidationError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::NameLength);
    }
    if payload.total_price < 0 {
        return Err(ValidationError::NegativePrice(payload.total_price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_payload() {
        let payload = ProductPayload::new("widget").with_total_price(500);
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let payload = ProductPayload::new("   ");
        assert_eq!(validate_payload(&payload), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_name_length_bounds() {
        assert_eq!(
            validate_payload(&ProductPayload::new("ab")),
            Err(ValidationError::NameLength)
        );
        assert!(validate_payload(&ProductPayload::new("abc")).is_ok());
        assert!(validate_payload(&ProductPayload::new("x".repeat(50))).is_ok());
        assert_eq!(
            validate_payload(&ProductPayload::new("x".repeat(51))),
            Err(ValidationError::NameLength)
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let payload = ProductPayload::new("widget").with_total_price(-1);
        assert_eq!(
            validate_payload(&payload),
            Err(ValidationError::NegativePrice(-1))
        );
    }
}
