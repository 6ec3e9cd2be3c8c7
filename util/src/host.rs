//! Host platform utility functions

use std::path::PathBuf;

/// Name of the environment variable giving the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "HAL_HEAD_SW_ROOT";

/// Retrieve the software root directory from the environment.
///
/// Parameter files and session directories are located relative to this
/// root.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    Ok(PathBuf::from(std::env::var(SW_ROOT_ENV_VAR)?))
}
