//! Property sinks.
//!
//! The injection target is anything implementing [`PropertySink`]: the CLI
//! writes a java-style properties file, library callers and tests use the
//! in-memory sink. Keys are unique with last-write-wins semantics.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::InjectError;

/// Key→string configuration namespace, appended to by the injector.
pub trait PropertySink {
    /// Set `key` to `value`, overwriting any previous entry.
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), InjectError>;
}

/// In-memory sink for library callers and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PropertySink for MemorySink {
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), InjectError> {
        if key.is_empty() {
            return Err(InjectError::InvalidKey(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Properties file target (`key=value` lines).
///
/// Entries are kept sorted and the file is rewritten whole on save, so
/// repeated runs against an unchanged store produce byte-identical output.
/// Existing entries in the file survive a run that injects other keys.
#[derive(Debug)]
pub struct PropertiesFile {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl PropertiesFile {
    /// Open `path`, loading existing entries if the file is present.
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read.
    pub fn load_or_empty(path: impl Into<PathBuf>) -> std::result::Result<Self, InjectError> {
        let path = path.into();
        let mut entries = BTreeMap::new();

        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| InjectError::ReadFailed {
                    path: path.display().to_string(),
                    source: e,
                })?;
            for line in contents.lines() {
                let line = line.trim_start();
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                if let Some((key, value)) = split_entry(line) {
                    entries.insert(unescape(&key), unescape(&value));
                }
            }
            debug!(path = %path.display(), entries = entries.len(), "loaded properties file");
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Write all entries back to the file, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns `InjectError::WriteFailed` if the file cannot be written.
    pub fn save(&self) -> std::result::Result<(), InjectError> {
        let mut contents = String::new();
        for (key, value) in &self.entries {
            contents.push_str(&escape_key(key));
            contents.push('=');
            contents.push_str(&escape_value(value));
            contents.push('\n');
        }

        std::fs::write(&self.path, contents).map_err(|e| InjectError::WriteFailed {
            path: self.path.display().to_string(),
            source: e,
        })?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "saved properties file");
        Ok(())
    }
}

impl PropertySink for PropertiesFile {
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), InjectError> {
        if key.is_empty() {
            return Err(InjectError::InvalidKey(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Split a properties line at the first unescaped `=`.
fn split_entry(line: &str) -> Option<(String, String)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' if !escaped => {
                return Some((line[..i].trim_end().to_string(), line[i + 1..].to_string()));
            }
            _ => escaped = false,
        }
    }
    None
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            ' ' => out.push_str("\\ "),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_sink_last_write_wins() {
        let mut sink = MemorySink::new();
        sink.set("a.value", "first").unwrap();
        sink.set("a.value", "second").unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get("a.value"), Some("second"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut sink = MemorySink::new();
        assert!(sink.set("", "v").is_err());
    }

    #[test]
    fn test_properties_file_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.properties");

        let mut props = PropertiesFile::load_or_empty(&path).unwrap();
        props.set("db.password.value", "p@ss=word\nline2").unwrap();
        props.set("api.key.value", "abc123").unwrap();
        props.save().unwrap();

        let reloaded = PropertiesFile::load_or_empty(&path).unwrap();
        assert_eq!(reloaded.get("db.password.value"), Some("p@ss=word\nline2"));
        assert_eq!(reloaded.get("api.key.value"), Some("abc123"));
    }

    #[test]
    fn test_saves_are_deterministic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.properties");

        let mut props = PropertiesFile::load_or_empty(&path).unwrap();
        props.set("b.value", "2").unwrap();
        props.set("a.value", "1").unwrap();
        props.save().unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        // re-open, inject in the other order, save again
        let mut props = PropertiesFile::load_or_empty(&path).unwrap();
        props.set("a.value", "1").unwrap();
        props.set("b.value", "2").unwrap();
        props.save().unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("a.value=1\n"));
    }

    #[test]
    fn test_existing_entries_survive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.properties");
        std::fs::write(&path, "# build settings\nkeep.me=yes\n").unwrap();

        let mut props = PropertiesFile::load_or_empty(&path).unwrap();
        props.set("new.value", "v").unwrap();
        props.save().unwrap();

        let reloaded = PropertiesFile::load_or_empty(&path).unwrap();
        assert_eq!(reloaded.get("keep.me"), Some("yes"));
        assert_eq!(reloaded.get("new.value"), Some("v"));
    }
}
