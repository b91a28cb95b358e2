//! Utilidades de validación
//!
//! Funciones usadas por los `#[validate(custom = ...)]` de los requests de creación
//! y helpers de formato de importes.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9]{7,15}$").expect("valid phone regex");
}

/// Validar formato de teléfono (solo dígitos, sin espacios ni puntuación)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Mayor cantidad aceptada en una línea de pedido
pub const MAX_QUANTITY: i32 = 1000;

/// Mayor importe que cabe en una columna `NUMERIC(10, 2)`
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// El importe cabe en las columnas de dinero del esquema
pub fn fits_money_column(value: &Decimal) -> bool {
    value.abs() <= max_amount()
}

/// Validar que un precio no sea negativo ni desborde la columna
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if (value.is_sign_negative() && !value.is_zero()) || !fits_money_column(value) {
        let mut error = ValidationError::new("price");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Redondea a dos decimales y formatea, p.ej. `50` -> `"50.00"`
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Normaliza entradas opcionales: una línea vacía se guarda como NULL
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0825551234").is_ok());
        assert!(validate_phone("082 555 1234").is_err());
        assert!(validate_phone("+27825551234").is_err());
        assert!(validate_phone("123").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::new(5000, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_ok());
        assert!(validate_price(&Decimal::new(-1, 2)).is_err());
        assert!(validate_price(&max_amount()).is_ok());
        assert!(validate_price(&Decimal::new(100_000_000, 0)).is_err());
    }

    #[test]
    fn test_money_column_bounds() {
        assert!(fits_money_column(&Decimal::new(99_999_999_99, 2)));
        assert!(!fits_money_column(&(Decimal::from(2_000_000) * Decimal::new(5000, 2))));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(50, 0)), "50.00");
        assert_eq!(format_money(Decimal::new(13000, 2)), "130.00");
        assert_eq!(format_money(Decimal::new(12345, 3)), "12.35");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Pretoria "), Some("Pretoria".to_string()));
    }
}
