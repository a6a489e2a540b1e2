//! Lyrics from local text files, one song per file

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::encoding::read_text_file;
use crate::error::{Error, Result};
use crate::provider::LyricsProvider;

/// Reads every matching file under a directory as one song
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
    recursive: bool,
    extensions: Vec<String>,
}

impl DirectoryProvider {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            recursive: false,
            extensions: vec!["txt".to_string()],
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Extensions to read, compared case-insensitively
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Matching files, sorted by path
    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        if !self.root.is_dir() {
            return Err(Error::provider(format!(
                "lyrics directory {:?} does not exist",
                self.root
            )));
        }

        let walker = if self.recursive {
            WalkDir::new(&self.root)
        } else {
            WalkDir::new(&self.root).max_depth(1)
        };

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && self.matches_extension(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl LyricsProvider for DirectoryProvider {
    fn name(&self) -> &str {
        "directory"
    }

    fn fetch_lyrics(&self, artist: &str) -> Result<Vec<String>> {
        let files = self.collect_files()?;
        log::info!("Found {} lyric files for {} in {:?}", files.len(), artist, self.root);

        let mut lyrics = Vec::with_capacity(files.len());
        for path in files {
            match read_text_file(&path) {
                Ok(text) if !text.trim().is_empty() => lyrics.push(text),
                Ok(_) => log::debug!("Skipping empty file {:?}", path),
                Err(e) => log::warn!("Could not read {:?}: {} - continuing", path, e),
            }
        }

        Ok(lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_sorted_matching_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "second song").unwrap();
        fs::write(dir.path().join("a.TXT"), "first song").unwrap();
        fs::write(dir.path().join("notes.md"), "not lyrics").unwrap();
        fs::write(dir.path().join("empty.txt"), "  \n").unwrap();

        let provider = DirectoryProvider::new(dir.path().to_path_buf());
        let lyrics = provider.fetch_lyrics("Someone").unwrap();

        assert_eq!(lyrics, vec!["first song".to_string(), "second song".to_string()]);
    }

    #[test]
    fn test_recursion_is_opt_in() {
        let dir = TempDir::new().unwrap();
        let album = dir.path().join("album");
        fs::create_dir(&album).unwrap();
        fs::write(dir.path().join("single.txt"), "single").unwrap();
        fs::write(album.join("track.txt"), "track").unwrap();

        let flat = DirectoryProvider::new(dir.path().to_path_buf());
        assert_eq!(flat.fetch_lyrics("x").unwrap().len(), 1);

        let deep = DirectoryProvider::new(dir.path().to_path_buf()).recursive(true);
        assert_eq!(deep.fetch_lyrics("x").unwrap().len(), 2);
    }

    #[test]
    fn test_extra_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.lrc"), "la la").unwrap();
        fs::write(dir.path().join("two.txt"), "da da").unwrap();

        let provider = DirectoryProvider::new(dir.path().to_path_buf())
            .extensions(vec!["lrc".to_string()]);
        assert_eq!(provider.fetch_lyrics("x").unwrap(), vec!["la la".to_string()]);
    }

    #[test]
    fn test_missing_directory() {
        let provider = DirectoryProvider::new(PathBuf::from("/definitely/not/here"));
        assert!(matches!(provider.fetch_lyrics("x"), Err(Error::Provider { .. })));
    }
}
