use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn require_home() -> Result<PathBuf> {
    user_home().ok_or(Error::NoHome)
}

/// Replace a leading `~` component with the user's home directory.
pub fn expand_home(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    match path.strip_prefix("~") {
        Ok(rest) => Ok(require_home()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_home_returns_optional() {
        let home = user_home();
        assert!(home.is_none() || !home.unwrap().as_os_str().is_empty());
    }

    #[test]
    fn test_user_home_matches_environment() {
        if let Some(home) = user_home() {
            let env_home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
            if let Some(env_home) = env_home.filter(|h| !h.is_empty()) {
                assert_eq!(home, PathBuf::from(env_home));
            }
        }
    }

    #[test]
    fn test_expand_home() {
        let plain = Path::new("relative/file.txt");
        assert_eq!(expand_home(plain).unwrap(), plain);
        assert_eq!(expand_home("/abs/~/x").unwrap(), Path::new("/abs/~/x"));
        assert_eq!(expand_home("~user/x").unwrap(), Path::new("~user/x"));

        if let Some(home) = user_home() {
            assert_eq!(expand_home("~/notes").unwrap(), home.join("notes"));
            assert_eq!(expand_home("~").unwrap(), home);
        }
    }
}
