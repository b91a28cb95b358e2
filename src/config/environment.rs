//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Las variables se leen
//! después de `dotenvy::dotenv()`, así que un `.env` local también sirve.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::database::DatabaseConfig;
use crate::utils::errors::{AppError, AppResult};

const DEFAULT_INVOICE_PATH: &str = "invoice.txt";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub database: DatabaseConfig,
    pub invoice_path: PathBuf,
}

impl EnvironmentConfig {
    /// Construye la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let connect_timeout =
            parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;

        let invoice_path = lookup("INVOICE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INVOICE_PATH));

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                connect_timeout: Duration::from_secs(connect_timeout),
            },
            invoice_path,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", key))),
        None => Ok(default),
    }
}
