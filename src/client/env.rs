//! Client configuration from `RETARUS_*` environment variables.

use super::{Credentials, DEFAULT_CUSTOMER_NUMBER, FaxClient, FaxClientBuilder, FaxError};
use crate::domain::Locale;

pub const ENV_USERNAME: &str = "RETARUS_USERNAME";
pub const ENV_PASSWORD: &str = "RETARUS_PASSWORD";
pub const ENV_CUSTOMER_NUMBER: &str = "RETARUS_CUSTOMER_NUMBER";
pub const ENV_LOCALE: &str = "RETARUS_LOCALE";

const DEFAULT_LOCALE: &str = "EUROPE";

impl FaxClientBuilder {
    /// Start a builder from the process environment.
    ///
    /// See [`FaxClientBuilder::from_env_map`] for the variables read.
    pub fn from_env() -> Result<Self, FaxError> {
        Self::from_env_map(|key| std::env::var(key).ok())
    }

    /// Start a builder from an arbitrary variable lookup.
    ///
    /// - `RETARUS_USERNAME`, `RETARUS_PASSWORD`: required, else [`FaxError::Auth`].
    /// - `RETARUS_CUSTOMER_NUMBER`: defaults to `12345`.
    /// - `RETARUS_LOCALE`: region or location name, case-insensitive, defaults to `EUROPE`.
    ///   An unknown name is a [`FaxError::Validation`].
    pub fn from_env_map<F>(lookup: F) -> Result<Self, FaxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials = Credentials::new(
            non_blank(ENV_USERNAME).unwrap_or_default(),
            non_blank(ENV_PASSWORD).unwrap_or_default(),
        )?;
        let customer_number =
            non_blank(ENV_CUSTOMER_NUMBER).unwrap_or_else(|| DEFAULT_CUSTOMER_NUMBER.to_owned());
        let locale_name = non_blank(ENV_LOCALE).unwrap_or_else(|| DEFAULT_LOCALE.to_owned());
        let locale = Locale::from_name(&locale_name)?;

        tracing::debug!(
            username = credentials.username(),
            %customer_number,
            %locale,
            "configured from environment"
        );

        Ok(FaxClientBuilder::new(credentials)
            .customer_number(customer_number)
            .locale(locale))
    }
}

impl FaxClient {
    /// Build a client from the process environment with default HTTP settings.
    pub fn from_env() -> Result<Self, FaxError> {
        FaxClientBuilder::from_env()?.build()
    }
}
