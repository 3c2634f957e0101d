use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref ENV_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").unwrap();
    static ref VARIABLE_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").unwrap();
}

const MAX_NAME_LEN: usize = 200;

pub fn validate_path_exists(path: &str) -> Result<String, String> {
    if Path::new(path).exists() {
        Ok(path.to_string())
    } else {
        Err(format!("Path does not exist: {path}"))
    }
}

/// Request names are free text (`Get Users`) or a relative file path.
pub fn validate_request_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Request name must not be empty".to_string());
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(format!("Name must be {MAX_NAME_LEN} characters or less"));
    }
    if trimmed.chars().any(char::is_control) {
        return Err("Name must not contain control characters".to_string());
    }
    Ok(trimmed.to_string())
}

/// Environment names are file stems under `environments/`.
pub fn validate_env_name(name: &str) -> Result<String, String> {
    if name.len() > MAX_NAME_LEN {
        return Err(format!("Name must be {MAX_NAME_LEN} characters or less"));
    }
    if !ENV_NAME_REGEX.is_match(name) {
        return Err(format!(
            "Environment name must match pattern: {}",
            ENV_NAME_REGEX.as_str()
        ));
    }
    Ok(name.to_string())
}

pub fn validate_variable(variable: &str) -> Result<(String, String), String> {
    let Some((name, value)) = variable.split_once('=') else {
        return Err("Variable must be in format NAME=VALUE".to_string());
    };
    if !VARIABLE_NAME_REGEX.is_match(name) {
        return Err(format!(
            "Invalid variable name: must match pattern {}",
            VARIABLE_NAME_REGEX.as_str()
        ));
    }
    Ok((name.to_string(), value.to_string()))
}
