//! Modelo de Item (producto del menú)

use rust_decimal::Decimal;
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_price};

/// Longitud de `item_name`
pub const ITEM_NAME_MAX_LEN: u64 = 150;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Item {
    #[sqlx(rename = "item_id")]
    pub id: i32,
    #[sqlx(rename = "item_name")]
    pub name: String,
    #[sqlx(rename = "item_price")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Validate)]
pub struct NewItem {
    #[validate(custom = "validate_not_blank", length(max = 150))]
    pub name: String,

    #[validate(custom = "validate_price")]
    pub price: Decimal,
}

/// Cambio sobre un item; cada variante lleva su valor tipado
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUpdate {
    Name(String),
    Price(Decimal),
}
