//! Host platform (linux for example) utility functions

use std::path::PathBuf;
use uname;

/// Environment variable pointing to the root of the software tree, which
/// holds the `params` and `sessions` directories.
pub const SW_ROOT_ENV_VAR: &str = "CAR_MODEL_SW_ROOT";

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the software root directory from the environment.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
