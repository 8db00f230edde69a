//! External tool lookup
//!
//! Resolves the cmake/ctest executables either from an explicit path or by
//! searching PATH.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Resolve an external tool to an existing executable path.
///
/// An explicit path must point at an existing file; otherwise the tool name
/// is looked up on PATH.
pub fn resolve(explicit: Option<PathBuf>, name: &str) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => {
            if path.is_file() {
                Ok(path)
            } else {
                Err(ConfigError::ToolNotFound {
                    tool: path.display().to_string(),
                })
            }
        }
        None => which::which(name).map_err(|_| ConfigError::ToolNotFound {
            tool: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_accepts_explicit_existing_file() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("cmake");
        std::fs::write(&tool, "").unwrap();

        let resolved = resolve(Some(tool.clone()), "cmake").unwrap();
        assert_eq!(resolved, tool);
    }

    #[test]
    fn test_resolve_rejects_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = resolve(Some(dir.path().join("gone")), "cmake");
        assert!(matches!(result, Err(ConfigError::ToolNotFound { .. })));
    }

    #[test]
    fn test_resolve_rejects_unknown_tool_name() {
        let result = resolve(None, "definitely-not-a-real-tool-name");
        assert!(matches!(result, Err(ConfigError::ToolNotFound { .. })));
    }
}
