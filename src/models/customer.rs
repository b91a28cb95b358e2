//! Modelo de Customer
//!
//! Mapea la tabla `customer`. Los datos de contacto pueden quedar incompletos
//! (NULL) al registrar un pedido y se corrigen más tarde campo por campo.

use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_phone};

/// Customer principal - mapea la tabla customer
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Customer {
    #[sqlx(rename = "customer_id")]
    pub id: i32,
    #[sqlx(rename = "customer_firstname")]
    pub first_name: String,
    #[sqlx(rename = "customer_surname")]
    pub surname: String,
    #[sqlx(rename = "customer_phone_num")]
    pub phone: Option<String>,
    #[sqlx(rename = "customer_address")]
    pub address: Option<String>,
    #[sqlx(rename = "customer_city")]
    pub city: Option<String>,
    #[sqlx(rename = "customer_email")]
    pub email: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }

    /// Campos de contacto todavía sin valor
    pub fn missing_fields(&self) -> Vec<CustomerField> {
        [
            (CustomerField::Phone, &self.phone),
            (CustomerField::Address, &self.address),
            (CustomerField::City, &self.city),
            (CustomerField::Email, &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn has_missing_info(&self) -> bool {
        !self.missing_fields().is_empty()
    }
}

/// Request para registrar un nuevo customer
#[derive(Debug, Clone, Validate)]
pub struct NewCustomer {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub first_name: String,

    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub surname: String,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,

    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

/// Campos editables desde el menú de actualización
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    FirstName,
    Surname,
    Phone,
    Address,
    City,
    Email,
}

impl CustomerField {
    pub const ALL: [CustomerField; 6] = [
        CustomerField::FirstName,
        CustomerField::Surname,
        CustomerField::Phone,
        CustomerField::Address,
        CustomerField::City,
        CustomerField::Email,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            CustomerField::FirstName => "customer_firstname",
            CustomerField::Surname => "customer_surname",
            CustomerField::Phone => "customer_phone_num",
            CustomerField::Address => "customer_address",
            CustomerField::City => "customer_city",
            CustomerField::Email => "customer_email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomerField::FirstName => "First Name",
            CustomerField::Surname => "Surname",
            CustomerField::Phone => "Phone Number",
            CustomerField::Address => "Address",
            CustomerField::City => "Location (City)",
            CustomerField::Email => "Email",
        }
    }

    /// Los nombres son NOT NULL en la tabla
    pub fn is_required(&self) -> bool {
        matches!(self, CustomerField::FirstName | CustomerField::Surname)
    }

    /// Longitud de la columna `VARCHAR`
    pub fn max_len(&self) -> u64 {
        match self {
            CustomerField::Phone => 20,
            CustomerField::Address | CustomerField::Email => 255,
            CustomerField::FirstName | CustomerField::Surname | CustomerField::City => 100,
        }
    }
}
