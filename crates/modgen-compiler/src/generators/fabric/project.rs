//! In-memory project tree.
//!
//! The whole output is assembled as a [`GeneratedProject`] before anything
//! touches the disk, so resource errors abort compilation with the previous
//! tree still intact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::diagnostic::ModError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Text(String),
    /// Copied verbatim from a user-supplied file.
    Bytes(Vec<u8>),
}

impl FileContents {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }
}

/// One file, with a path relative to the project root.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: FileContents,
    pub executable: bool,
}

/// Files in emission order. A later file with the same path replaces the
/// earlier one on disk.
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    files: Vec<GeneratedFile>,
    missing_assets: Vec<String>,
}

impl GeneratedProject {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, path: PathBuf, contents: FileContents, executable: bool) {
        self.files.push(GeneratedFile {
            path,
            contents,
            executable,
        });
    }

    /// Adds a text file. Trailing whitespace is replaced by a single newline.
    pub fn text(&mut self, path: impl Into<PathBuf>, content: impl AsRef<str>) {
        let content = format!("{}\n", content.as_ref().trim_end());
        self.push(path.into(), FileContents::Text(content), false);
    }

    /// Adds a text file marked executable on Unix.
    pub fn script(&mut self, path: impl Into<PathBuf>, content: impl AsRef<str>) {
        let content = format!("{}\n", content.as_ref().trim_end());
        self.push(path.into(), FileContents::Text(content), true);
    }

    /// Adds a pretty-printed JSON document (two-space indent, key order kept).
    pub fn json<T: Serialize + ?Sized>(
        &mut self,
        path: impl Into<PathBuf>,
        value: &T,
    ) -> Result<(), ModError> {
        let content = serde_json::to_string_pretty(value)?;
        self.push(path.into(), FileContents::Text(content + "\n"), false);
        Ok(())
    }

    pub fn bytes(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.push(path.into(), FileContents::Bytes(bytes), false);
    }

    /// Copies `source` into the tree when it names an existing file.
    /// Returns false when there is nothing to copy.
    pub fn copy_if_exists(
        &mut self,
        source: Option<&str>,
        path: impl Into<PathBuf>,
    ) -> Result<bool, ModError> {
        let Some(source) = source.map(Path::new).filter(|p| p.is_file()) else {
            return Ok(false);
        };
        let bytes = fs::read(source).map_err(|e| ModError::io(source, e))?;
        self.bytes(path, bytes);
        Ok(true)
    }

    /// Records a texture source that could not be found.
    pub fn note_missing_asset(&mut self, source: impl Into<String>) {
        self.missing_assets.push(source.into());
    }

    pub fn missing_assets(&self) -> &[String] {
        &self.missing_assets
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// The file that ends up on disk at `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        let path = path.as_ref();
        self.files.iter().rev().find(|file| file.path == path)
    }

    /// Text of the file at `path`, if it is a text file.
    pub fn text_of(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.get(path).and_then(|file| file.contents.as_text())
    }

    /// Replaces `root` with this tree.
    pub fn write(&self, root: &Path) -> Result<(), ModError> {
        if root.exists() {
            fs::remove_dir_all(root).map_err(|e| ModError::io(root, e))?;
        }
        fs::create_dir_all(root).map_err(|e| ModError::io(root, e))?;

        for file in &self.files {
            let target = root.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| ModError::io(parent, e))?;
            }
            fs::write(&target, file.contents.as_bytes()).map_err(|e| ModError::io(&target, e))?;
            if file.executable {
                mark_executable(&target)?;
            }
        }

        debug!(root = %root.display(), files = self.files.len(), "wrote project tree");
        Ok(())
    }
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), ModError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| ModError::io(path, e))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), ModError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_ends_with_one_newline() {
        let mut project = GeneratedProject::new();
        project.text("a.txt", "hello\n\n  ");
        project.text("b.txt", "bare");
        assert_eq!(project.text_of("a.txt"), Some("hello\n"));
        assert_eq!(project.text_of("b.txt"), Some("bare\n"));
    }

    #[test]
    fn json_is_pretty_and_ordered() {
        let mut project = GeneratedProject::new();
        project.json("x.json", &json!({"zeta": 1, "alpha": [true]})).unwrap();
        assert_eq!(
            project.text_of("x.json"),
            Some("{\n  \"zeta\": 1,\n  \"alpha\": [\n    true\n  ]\n}\n")
        );
    }

    #[test]
    fn later_files_win() {
        let mut project = GeneratedProject::new();
        project.text("same.txt", "first");
        project.text("same.txt", "second");
        assert_eq!(project.text_of("same.txt"), Some("second\n"));
    }

    #[test]
    fn write_replaces_previous_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("stale")).unwrap();
        fs::write(root.join("stale/old.txt"), "old").unwrap();

        let mut project = GeneratedProject::new();
        project.text("nested/dir/new.txt", "new");
        project.script("run.sh", "#!/bin/sh");
        project.write(&root).unwrap();

        assert!(!root.join("stale").exists());
        assert_eq!(fs::read_to_string(root.join("nested/dir/new.txt")).unwrap(), "new\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(root.join("run.sh")).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn copy_skips_missing_sources() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("tex.png");
        fs::write(&source, b"PNG").unwrap();

        let mut project = GeneratedProject::new();
        assert!(project.copy_if_exists(source.to_str(), "out.png").unwrap());
        assert!(!project.copy_if_exists(Some("/no/such/file.png"), "x.png").unwrap());
        assert!(!project.copy_if_exists(None, "y.png").unwrap());

        assert_eq!(project.files().len(), 1);
        assert_eq!(project.get("out.png").unwrap().contents.as_bytes(), b"PNG");
    }
}
