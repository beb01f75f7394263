//! Filesystem capability probing.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Check whether symbolic links can be created under `dir`.
///
/// Creates and removes a scratch link next to where the real link would
/// live. A deliberate probe keeps unrelated IO errors from being mistaken
/// for "symlinks unsupported" on this filesystem.
pub fn symlinks_supported(dir: &Path) -> bool {
    let probe = dir.join(".symlink-probe");
    remove_symlink(&probe);
    match symlink_dir(dir, &probe) {
        Ok(()) => {
            remove_symlink(&probe);
            true
        }
        Err(e) => {
            debug!("Symlink probe under {} failed: {}", dir.display(), e);
            false
        }
    }
}

#[cfg(unix)]
fn remove_symlink(link: &Path) {
    let _ = fs::remove_file(link);
}

// Directory symlinks on Windows are removed like directories.
#[cfg(windows)]
fn remove_symlink(link: &Path) {
    let _ = fs::remove_dir(link);
}

/// Create a directory symlink `link` pointing at `target`.
#[cfg(unix)]
pub fn symlink_dir(target: &Path, link: &Path) -> Result<(), std::io::Error> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a directory symlink `link` pointing at `target`.
#[cfg(windows)]
pub fn symlink_dir(target: &Path, link: &Path) -> Result<(), std::io::Error> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("splatrun-probe-{}-{}", tag, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_probe_leaves_no_residue() {
        let dir = scratch_dir("residue");
        let _ = symlinks_supported(&dir);
        assert!(fs::read_dir(&dir).unwrap().next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_supported_on_unix_tmp() {
        let dir = scratch_dir("unix");
        assert!(symlinks_supported(&dir));
    }
}
