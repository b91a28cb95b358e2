//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema y cómo
//! se presentan al operador de la consola.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("You tried to enter non-existent reference data: {0}")]
    InvalidReference(String),

    #[error("No driver is available in {0}")]
    NoDriverAvailable(String),

    #[error("Order {0} has already been finalised")]
    AlreadyFinalised(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Errores que terminan la sesión. El resto se reporta y se vuelve al menú.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Io(_) | AppError::Config(_))
    }

    /// Mensaje corto para mostrar en la consola
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => {
                "An error occurred while accessing the database".to_string()
            }
            AppError::Validation(e) => format!("The provided data is invalid: {}", e),
            other => other.to_string(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, key: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' not found", resource, key))
}

/// Motivo legible para los SQLSTATE de datos (clase 22) y restricciones (clase 23)
pub fn rejected_input_reason(code: &str) -> Option<&'static str> {
    match code {
        "22001" => Some("a text value is too long"),
        "22003" => Some("a numeric value is out of range"),
        c if c.starts_with("22") => Some("a value has an invalid format"),
        c if c.starts_with("23") => Some("a value breaks a data constraint"),
        _ => None,
    }
}

/// Clasifica un fallo de escritura. Las claves foráneas rotas son `InvalidReference`;
/// los valores rechazados por el esquema son `InvalidInput`. El resto sigue siendo
/// un error de base de datos.
pub fn map_write_error(resource: &str, error: sqlx::Error) -> AppError {
    let reason = match &error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            return AppError::InvalidReference(format!(
                "{} references a record that does not exist",
                resource
            ));
        }
        sqlx::Error::Database(db) => db.code().and_then(|code| rejected_input_reason(&code)),
        _ => None,
    };

    match reason {
        Some(reason) => rejected_input(resource, reason),
        None => AppError::Database(error),
    }
}

pub fn rejected_input(resource: &str, reason: &str) -> AppError {
    AppError::InvalidInput(format!("{} was rejected: {}", resource, reason))
}
