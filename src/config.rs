//! Loading the spending quotas from a configuration file.

use std::{fs, path::Path};

use crate::{Error, Quotas};

/// Read the spending quotas from the JSON file at `path`.
///
/// The file looks like `{"daily": "70", "weekly": "500", "monthly": "1500"}`. Amounts may be
/// strings or numbers, and any granularity left out uses its default quota.
///
/// # Errors
/// Returns [Error::InvalidQuotaConfig] if the file cannot be read, is not valid JSON, or sets a
/// negative quota.
pub fn load_quotas(path: &Path) -> Result<Quotas, Error> {
    let text = fs::read_to_string(path).map_err(|error| {
        Error::InvalidQuotaConfig(format!("could not read {}: {error}", path.display()))
    })?;

    parse_quotas(&text)
}

fn parse_quotas(text: &str) -> Result<Quotas, Error> {
    let quotas: Quotas =
        serde_json::from_str(text).map_err(|error| Error::InvalidQuotaConfig(error.to_string()))?;

    for (name, quota) in [
        ("daily", quotas.daily),
        ("weekly", quotas.weekly),
        ("monthly", quotas.monthly),
    ] {
        if quota.is_sign_negative() && !quota.is_zero() {
            return Err(Error::InvalidQuotaConfig(format!(
                "the {name} quota cannot be negative, got {quota}"
            )));
        }
    }

    Ok(quotas)
}
