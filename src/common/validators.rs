// src/common/validators.rs
//
// Validadores customizados usados nos payloads (`#[validate(custom(function = ...))]`).

use std::borrow::Cow;

use uuid::Uuid;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Telefone indiano: exatamente 10 dígitos.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && all_digits(value) {
        Ok(())
    } else {
        Err(error("phone", "Phone number must be exactly 10 digits"))
    }
}

/// PIN code: 6 dígitos, sem zero à esquerda.
pub fn validate_pincode(value: &str) -> Result<(), ValidationError> {
    if value.len() == 6 && all_digits(value) && !value.starts_with('0') {
        Ok(())
    } else {
        Err(error("pincode", "Pincode must be a 6-digit number not starting with 0"))
    }
}

pub fn validate_aadhaar(value: &str) -> Result<(), ValidationError> {
    if value.len() != 12 {
        return Err(error("aadhaar_length", "Aadhaar number must be 12 digits"));
    }
    if !all_digits(value) {
        return Err(error("aadhaar_digits", "Aadhaar number must contain only digits"));
    }
    Ok(())
}

/// Campo obrigatório que não pode ser só espaços.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", "This field is required"))
    } else {
        Ok(())
    }
}

pub fn validate_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= 10 {
        Ok(())
    } else {
        Err(error("address", "Address must be at least 10 characters long"))
    }
}

/// Cada referência precisa ter o formato de um id (UUID).
pub fn validate_reference_ids(ids: &[String]) -> Result<(), ValidationError> {
    if ids.iter().all(|id| Uuid::parse_str(id.trim()).is_ok()) {
        Ok(())
    } else {
        Err(error("reference_id", "Every service id must be a valid id"))
    }
}

pub fn validate_non_negative(value: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(error("range", "Value must be greater than or equal to 0"))
    } else {
        Ok(())
    }
}

pub fn validate_positive(value: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(error("range", "Value must be greater than 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn phone_requires_exactly_ten_digits() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("987654321").is_err());
        assert!(validate_phone("98765432100").is_err());
        assert!(validate_phone("98765-4321").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn pincode_rejects_leading_zero() {
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode("060001").is_err());
        assert!(validate_pincode("56000").is_err());
        assert!(validate_pincode("56000a").is_err());
    }

    #[test]
    fn aadhaar_reports_length_before_digits() {
        assert!(validate_aadhaar("123412341234").is_ok());
        assert_eq!(validate_aadhaar("1234").unwrap_err().code, "aadhaar_length");
        assert_eq!(validate_aadhaar("12341234123x").unwrap_err().code, "aadhaar_digits");
    }

    #[test]
    fn reference_ids_must_all_parse() {
        let good = vec![Uuid::new_v4().to_string(), Uuid::new_v4().to_string()];
        assert!(validate_reference_ids(&good).is_ok());

        let bad = vec![Uuid::new_v4().to_string(), "64b7f0c2a1".to_string()];
        assert!(validate_reference_ids(&bad).is_err());
    }

    #[test]
    fn decimal_bounds() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::new(1500, 0)).is_ok());
    }
}
