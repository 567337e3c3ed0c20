/// Markdown journal entries with a YAML frontmatter header.
///
/// ```text
/// ---
/// seconds: 1260
/// lowmood: 2
/// highmood: 4
/// averagemood: 3
/// ---
/// Body text...
/// ```
///
/// A file with no leading `---` line has no header and is all body. Files
/// must be UTF-8; anything else fails to load.
use super::Entry;
use crate::error::EntryError;
use crate::model::date_from_name;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const FRONTMATTER_DELIMITER: &str = "---";

/// Metadata recorded in the frontmatter header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryMetadata {
    /// Seconds spent writing the entry.
    pub seconds: u16,
    #[serde(rename = "lowmood")]
    pub low_mood: u8,
    #[serde(rename = "highmood")]
    pub high_mood: u8,
    #[serde(rename = "averagemood")]
    pub average_mood: u8,
}

#[derive(Debug, Clone)]
pub struct JournalEntry {
    path: PathBuf,
    metadata: EntryMetadata,
    body: String,
    /// Modification time observed by the last successful `load`.
    modified: Option<SystemTime>,
}

impl JournalEntry {
    /// An unloaded entry for `path`. Nothing is read until [`Entry::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metadata: EntryMetadata::default(),
            body: String::new(),
            modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut EntryMetadata {
        &mut self.metadata
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Write the frontmatter header followed by the body, replacing the file.
    pub fn save(&self) -> Result<(), EntryError> {
        let header = serde_yaml::to_string(&self.metadata)?;
        let mut data = String::with_capacity(header.len() + self.body.len() + 8);
        data.push_str(FRONTMATTER_DELIMITER);
        data.push('\n');
        data.push_str(&header);
        data.push_str(FRONTMATTER_DELIMITER);
        data.push('\n');
        data.push_str(&self.body);
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl Entry for JournalEntry {
    fn load(&mut self) -> Result<bool, EntryError> {
        // One handle for both the content and its mtime.
        let mut file = fs::File::open(&self.path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        let modified = file.metadata()?.modified().ok();

        let text = String::from_utf8(data)?;
        let (metadata, body) = split_frontmatter(&text)?;

        let changed = self.modified.is_none() || modified != self.modified;
        self.metadata = metadata;
        self.body = body.to_owned();
        self.modified = modified;
        Ok(changed)
    }

    fn date(&self) -> Result<NaiveDate, EntryError> {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        date_from_name(&name).ok_or(EntryError::Undated { name })
    }

    fn body(&self) -> &str {
        &self.body
    }
}

/// Split `text` into decoded frontmatter and the body that follows it.
fn split_frontmatter(text: &str) -> Result<(EntryMetadata, &str), EntryError> {
    let text = text.trim_start_matches('\u{feff}');

    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    if first.trim_end() != FRONTMATTER_DELIMITER {
        return Ok((EntryMetadata::default(), text));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let metadata = if yaml.trim().is_empty() {
                EntryMetadata::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((metadata, body));
        }
        offset += line.len();
    }

    Err(EntryError::UnterminatedFrontmatter)
}
