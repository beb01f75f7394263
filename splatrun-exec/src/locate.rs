//! Tool discovery across an ordered list of install locations.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ExecError;

/// Return the first existing file from an ordered candidate list.
///
/// Deployment environments differ in where the external tools live (a
/// containerized install vs. a local checkout), so callers pass the list
/// explicitly rather than this crate hardcoding locations. The error names
/// every path that was tried.
pub fn find_tool(name: &str, candidates: &[PathBuf]) -> Result<PathBuf, ExecError> {
    for candidate in candidates {
        if candidate.is_file() {
            debug!("Found {} at {}", name, candidate.display());
            return Ok(candidate.clone());
        }
    }
    Err(ExecError::ToolNotFound {
        name: name.to_string(),
        searched: candidates.to_vec(),
    })
}

/// Convenience check used by diagnostics: does any candidate exist?
pub fn tool_available(candidates: &[PathBuf]) -> bool {
    candidates.iter().any(|c| c.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("splatrun-locate-{}-{}", tag, std::process::id()));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).unwrap();
        }
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_tool_prefers_earlier_candidates() {
        let dir = scratch_dir("order");
        let first = dir.join("first.py");
        let second = dir.join("second.py");
        std::fs::write(&first, "").unwrap();
        std::fs::write(&second, "").unwrap();

        let found = find_tool("convert.py", &[first.clone(), second]).unwrap();
        assert_eq!(found, first);
    }

    #[test]
    fn test_find_tool_skips_missing_candidates() {
        let dir = scratch_dir("skip");
        let missing = dir.join("missing.py");
        let present = dir.join("present.py");
        std::fs::write(&present, "").unwrap();

        let found = find_tool("convert.py", &[missing, present.clone()]).unwrap();
        assert_eq!(found, present);
    }

    #[test]
    fn test_find_tool_reports_all_searched_paths() {
        let dir = scratch_dir("none");
        let a = dir.join("a.py");
        let b = dir.join("b.py");

        let err = find_tool("train.py", &[a.clone(), b.clone()]).unwrap_err();
        match err {
            ExecError::ToolNotFound { name, searched } => {
                assert_eq!(name, "train.py");
                assert_eq!(searched, vec![a, b]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tool_available() {
        let dir = scratch_dir("avail");
        let present = dir.join("tool.py");
        std::fs::write(&present, "").unwrap();

        assert!(tool_available(&[dir.join("nope.py"), present]));
        assert!(!tool_available(&[dir.join("nope.py")]));
    }
}
