use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// Widths the padding channel can express. Channel value 0 means a bare frame
// number, 4 means five digits.
pub fn padding_width(padding: i64) -> usize {
    (padding.max(0) as usize) + 1
}

pub fn frame_for_time(time: f64, fps: f64) -> i64 {
    (time * fps + 0.5).floor() as i64
}

// A cache channel value split into the pieces that stay fixed across a
// sequence. "caches/burst.0001.bin" and "caches/burst_####.bin" both reduce
// to a prefix, a parent directory, and an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePattern {
    parent: PathBuf,
    prefix: String,
    extension: String,
}

fn strip_frame_suffix(stem: &str) -> &str {
    stem.trim_end_matches(|c: char| c == '#' || c.is_ascii_digit())
}

impl SequencePattern {
    pub fn from_path(path: &Path) -> Option<Self> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty())?;
        let stem = path.file_stem()?.to_str()?;
        let extension = match path.extension() {
            Some(ext) => format!(".{}", ext.to_str()?),
            None => String::new(),
        };
        Some(Self {
            parent: parent.to_path_buf(),
            prefix: strip_frame_suffix(stem).to_string(),
            extension,
        })
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn frame_file_name(&self, frame: i64, width: usize) -> String {
        format!("{}{:0width$}{}", self.prefix, frame, self.extension)
    }

    pub fn frame_path(&self, frame: i64, width: usize) -> PathBuf {
        self.parent.join(self.frame_file_name(frame, width))
    }

    // A file belongs to the frame when everything between prefix and
    // extension is the frame number behind an optional run of zeros.
    pub fn matches(&self, file_name: &str, frame: i64) -> bool {
        let Some(rest) = file_name.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let Some(rest) = rest.strip_suffix(self.extension.as_str()) else {
            return false;
        };
        let frame_digits = frame.to_string();
        let Some(zeros) = rest.strip_suffix(frame_digits.as_str()) else {
            return false;
        };
        zeros.bytes().all(|b| b == b'0')
    }

    // Scans the parent directory for the frame. Ties across padding variants
    // go to the lexicographically first name so repeat scans agree.
    pub fn resolve_frame(&self, frame: i64) -> Result<Option<PathBuf>> {
        let entries = fs::read_dir(&self.parent)
            .with_context(|| format!("scanning cache directory {:?}", self.parent))?;
        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("scanning cache directory {:?}", self.parent))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if self.matches(name, frame) {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found.into_iter().next())
    }
}

// Channel values without a parent directory (including the "*.*" placeholder)
// resolve to nothing rather than an error.
pub fn resolve_for_channel(cache_path: &str, frame: i64) -> Result<Option<PathBuf>> {
    let Some(pattern) = SequencePattern::from_path(Path::new(cache_path)) else {
        return Ok(None);
    };
    pattern.resolve_frame(frame)
}
