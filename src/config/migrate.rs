use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use serde_yaml::Value;
use std::fs;

/// Keys every current configuration file should carry.
pub const KNOWN_FIELDS: [&str; 6] = [
    "database",
    "host",
    "port",
    "daily_window_days",
    "monthly_window_months",
    "recent_activity_limit",
];

/// Fields absent from the YAML document in `content`.
pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))?;

    let map = match yaml.as_mapping() {
        Some(m) => m,
        None => return Ok(KNOWN_FIELDS.to_vec()),
    };

    Ok(KNOWN_FIELDS
        .into_iter()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Report missing fields of the on-disk configuration.
pub fn check_config_file() -> AppResult<Vec<&'static str>> {
    let path = Config::config_file();
    if !path.exists() {
        warning(format!("No configuration file at {}", path.display()));
        return Ok(KNOWN_FIELDS.to_vec());
    }

    let content = fs::read_to_string(&path)?;
    let missing = missing_fields(&content)?;

    if missing.is_empty() {
        success("Configuration file is complete.");
    } else {
        for field in &missing {
            warning(format!("Missing field: {field} (default will be used)"));
        }
    }
    Ok(missing)
}

/// Rewrite the configuration file with defaults for every missing field.
/// Returns `true` when the file changed.
pub fn run_config_migration() -> AppResult<bool> {
    let path = Config::config_file();
    if !path.exists() {
        info("No configuration file found; nothing to migrate.");
        return Ok(false);
    }

    let content = fs::read_to_string(&path)?;
    let missing = missing_fields(&content)?;
    if missing.is_empty() {
        info("Configuration already up to date.");
        return Ok(false);
    }

    // serde defaults fill the gaps, saving writes them out
    let cfg = Config::from_yaml(&content)?;
    cfg.save()?;

    success(format!(
        "Configuration migrated: added {}",
        missing.join(", ")
    ));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_absent_keys() {
        let missing = missing_fields("database: /x.sqlite\nhost: 0.0.0.0\nport: 80\n").unwrap();
        assert_eq!(
            missing,
            vec!["daily_window_days", "monthly_window_months", "recent_activity_limit"]
        );
    }

    #[test]
    fn complete_file_has_nothing_missing() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(missing_fields(&yaml).unwrap().is_empty());
    }
}
