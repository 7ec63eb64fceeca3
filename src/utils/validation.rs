use crate::utils::error::{GreeterError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let Some(path_str) = path.to_str() else {
        return Err(GreeterError::InvalidConfig {
            field: field_name.to_string(),
            reason: "Path is not valid UTF-8".to_string(),
        });
    };

    if path_str.trim().is_empty() {
        return Err(GreeterError::InvalidConfig {
            field: field_name.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path_str.contains('\0') {
        return Err(GreeterError::InvalidConfig {
            field: field_name.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
