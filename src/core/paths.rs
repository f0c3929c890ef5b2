//! Filesystem locations.

use crate::{
    error::{DfsError, Result},
    DB_PATH_ENV_VAR,
};
use dirs::cache_dir;
use std::path::PathBuf;

/// Path of the SQLite player database.
///
/// `DFS_OPTIMIZER_DB` wins when set and non-empty; otherwise the database
/// lives at `<cache_dir>/dfs-optimizer/players.db`.
pub fn database_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_database_path()
}

pub fn default_database_path() -> Result<PathBuf> {
    let cache_dir = cache_dir().ok_or(DfsError::NoCacheDir)?;
    Ok(cache_dir.join("dfs-optimizer").join("players.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_layout() {
        // Some CI sandboxes have no cache directory at all.
        if let Ok(path) = default_database_path() {
            assert!(path.ends_with("dfs-optimizer/players.db"));
        }
    }
}
