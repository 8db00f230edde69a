//! Parallelism resolution
//!
//! One rule, applied independently for build-time and test-time
//! parallelism: explicit value, then environment variable, then the number
//! of available processing units. The result is always at least 1.

use crate::error::PipelineError;

/// Resolve a parallelism level, consulting `env_var` when no explicit value
/// is given.
pub fn resolve(explicit: Option<usize>, env_var: &str) -> Result<usize, PipelineError> {
    resolve_from(explicit, std::env::var(env_var).ok().as_deref(), env_var)
}

/// Pure precedence rule behind [`resolve`].
///
/// An environment value must be a non-negative integer string; anything
/// else is an error rather than a silent fallback.
fn resolve_from(
    explicit: Option<usize>,
    env_value: Option<&str>,
    env_var: &str,
) -> Result<usize, PipelineError> {
    if let Some(n) = explicit {
        return Ok(n.max(1));
    }
    if let Some(raw) = env_value {
        let invalid = || PipelineError::InvalidJobs {
            var: env_var.to_string(),
            value: raw.to_string(),
        };
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let n: usize = raw.parse().map_err(|_| invalid())?;
        return Ok(n.max(1));
    }
    Ok(num_cpus::get().max(1))
}
