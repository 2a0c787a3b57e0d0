//! Filesystem persistence for downloaded solutions
//!
//! Solutions are laid out as `<root>/<username>/<contest>/<code><ext>`.

use crate::output::language::extension_for_language;
use crate::output::traits::{OutputResult, SolutionFile, SolutionSink};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes solutions below a root directory
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
}

impl FileSystemSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a solution would be written to, without touching the disk
    pub fn path_for(&self, solution: &SolutionFile) -> PathBuf {
        let mut dir = self.root.join(sanitize_component(&solution.username));
        if let Some(contest) = solution.contest.as_deref().filter(|c| !c.trim().is_empty()) {
            dir.push(sanitize_component(contest));
        }

        let file_name = format!(
            "{}{}",
            sanitize_component(&solution.problem_code),
            extension_for_language(&solution.language)
        );
        dir.join(file_name)
    }
}

impl SolutionSink for FileSystemSink {
    fn persist(&self, solution: &SolutionFile) -> OutputResult<PathBuf> {
        let path = self.path_for(solution);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&path)?;
        file.write_all(solution.source.as_bytes())?;

        tracing::debug!("Wrote {} bytes to {}", solution.source.len(), path.display());
        Ok(path)
    }
}

/// Makes a site-provided name safe to use as a single path component
fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn solution(contest: Option<&str>, code: &str, language: &str) -> SolutionFile {
        SolutionFile {
            username: "alice".to_string(),
            contest: contest.map(str::to_string),
            problem_code: code.to_string(),
            language: language.to_string(),
            source: "int main() {}\n".to_string(),
        }
    }

    #[test]
    fn test_path_layout() {
        let sink = FileSystemSink::new("/data");
        let path = sink.path_for(&solution(Some("Practice"), "FLOW001", "C++14"));
        assert_eq!(path, PathBuf::from("/data/alice/Practice/FLOW001.cpp"));
    }

    #[test]
    fn test_path_without_contest() {
        let sink = FileSystemSink::new("/data");
        let path = sink.path_for(&solution(None, "TEST", "PYTH 3.6"));
        assert_eq!(path, PathBuf::from("/data/alice/TEST.py"));
    }

    #[test]
    fn test_persist_creates_directories_and_writes() {
        let dir = TempDir::new().unwrap();
        let sink = FileSystemSink::new(dir.path());

        let path = sink
            .persist(&solution(Some("JAN15"), "CHEF", "JAVA"))
            .unwrap();

        assert_eq!(path, dir.path().join("alice").join("JAN15").join("CHEF.java"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "int main() {}\n");
    }

    #[test]
    fn test_persist_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let sink = FileSystemSink::new(dir.path());
        let mut file = solution(Some("JAN15"), "CHEF", "C");

        sink.persist(&file).unwrap();
        file.source = "second\n".to_string();
        let path = sink.persist(&file).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second\n");
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Practice(extcontest)"), "Practice(extcontest)");
        assert_eq!(sanitize_component("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("  "), "_");
    }
}
