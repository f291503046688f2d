// Discovery of daily note files: a directory is listed once, every regular
// file named `YYYYMMDD.md` is mapped to its ISO date, everything else is
// reported back as unmatched.

use crate::error::{ImportError, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

static DAILY_NOTE_FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})([0-1][0-9])([0-9]{2})\.md$").expect("valid daily note regex")
});

/// Map a file name such as `20230101.md` to `2023-01-01`.
///
/// Only the shape of the name is checked: `20231301.md` yields `2023-13-01`.
/// The remote service is the one that rejects impossible dates.
pub fn match_daily_note_filename(file_name: &str) -> Option<String> {
    let caps = DAILY_NOTE_FILENAME_RE.captures(file_name)?;
    Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// One daily note file and the day it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyNoteEntry {
    pub date: String,
    pub file_path: PathBuf,
}

/// Ordered ISO date -> file path mapping.
///
/// Order is insertion order. Inserting a date that is already present
/// replaces its path but keeps its original position (last write wins).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyNoteMapping {
    entries: Vec<DailyNoteEntry>,
    positions: HashMap<String, usize>,
}

impl DailyNoteMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: String, file_path: PathBuf) {
        match self.positions.get(&date) {
            Some(&pos) => self.entries[pos].file_path = file_path,
            None => {
                self.positions.insert(date.clone(), self.entries.len());
                self.entries.push(DailyNoteEntry { date, file_path });
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<&Path> {
        self.positions
            .get(date)
            .map(|&pos| self.entries[pos].file_path.as_path())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyNoteEntry> {
        self.entries.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.date.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chronological order. ISO dates sort correctly as strings.
    pub fn sorted_by_date(mut self) -> Self {
        self.entries.sort_by(|a, b| a.date.cmp(&b.date));
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.date.clone(), pos))
            .collect();
        self
    }
}

/// Result of scanning a notes directory.
#[derive(Debug)]
pub struct Discovery {
    pub mapping: DailyNoteMapping,
    /// Regular files whose names did not match, in listing order.
    pub unmatched: Vec<String>,
}

/// Fail unless `notes_dir` exists and is a directory.
pub fn ensure_notes_dir(notes_dir: &Path) -> Result<()> {
    let meta = fs::metadata(notes_dir).map_err(|e| {
        ImportError::InvalidInput(format!("{}: {}", notes_dir.display(), e))
    })?;
    if !meta.is_dir() {
        return Err(ImportError::InvalidInput(format!(
            "{} is not a directory",
            notes_dir.display()
        )));
    }
    Ok(())
}

/// List `notes_dir` (non-recursive) and build the daily note mapping in
/// directory listing order. Directories, symlinks and other non-regular
/// entries are ignored.
pub fn discover_daily_notes(notes_dir: &Path) -> Result<Discovery> {
    ensure_notes_dir(notes_dir)?;

    let io_err = |source: std::io::Error| ImportError::Io {
        path: notes_dir.to_path_buf(),
        source,
    };

    let mut mapping = DailyNoteMapping::new();
    let mut unmatched = Vec::new();

    for dir_entry in fs::read_dir(notes_dir).map_err(io_err)? {
        let dir_entry = dir_entry.map_err(io_err)?;
        if !dir_entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }

        let name = dir_entry.file_name();
        let date = name.to_str().and_then(match_daily_note_filename);
        match date {
            Some(date) => {
                debug!("matched {} -> {}", name.to_string_lossy(), date);
                mapping.insert(date, notes_dir.join(&name));
            }
            None => {
                let name = name.to_string_lossy().into_owned();
                warn!("not a daily note file: {}", name);
                unmatched.push(name);
            }
        }
    }

    if mapping.is_empty() {
        return Err(ImportError::EmptyResult(format!(
            "No file in {} matches the YYYYMMDD.md daily note pattern",
            notes_dir.display()
        )));
    }

    Ok(Discovery { mapping, unmatched })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_plain_daily_note_names() {
        assert_eq!(
            match_daily_note_filename("20230101.md").as_deref(),
            Some("2023-01-01")
        );
        assert_eq!(
            match_daily_note_filename("19991231.md").as_deref(),
            Some("1999-12-31")
        );
    }

    #[test]
    fn calendar_validity_is_not_checked() {
        assert_eq!(
            match_daily_note_filename("20231301.md").as_deref(),
            Some("2023-13-01")
        );
        assert_eq!(
            match_daily_note_filename("20230132.md").as_deref(),
            Some("2023-01-32")
        );
    }

    #[test]
    fn rejects_everything_else() {
        for name in [
            "README.md",
            "notes.txt",
            "20232001.md",
            "2023-01-01.md",
            "20230101.MD",
            "20230101.md.bak",
            "x20230101.md",
            "2023010.md",
            "202301011.md",
            "20230101.txt",
        ] {
            assert_eq!(match_daily_note_filename(name), None, "{name}");
        }
    }

    #[test]
    fn duplicate_date_keeps_position_and_takes_last_path() {
        let mut mapping = DailyNoteMapping::new();
        mapping.insert("2023-01-01".into(), PathBuf::from("a.md"));
        mapping.insert("2023-01-02".into(), PathBuf::from("b.md"));
        mapping.insert("2023-01-01".into(), PathBuf::from("c.md"));

        assert_eq!(mapping.len(), 2);
        let dates: Vec<&str> = mapping.dates().collect();
        assert_eq!(dates, vec!["2023-01-01", "2023-01-02"]);
        assert_eq!(mapping.get("2023-01-01"), Some(Path::new("c.md")));
    }

    #[test]
    fn sorting_orders_by_date() {
        let mut mapping = DailyNoteMapping::new();
        mapping.insert("2023-03-01".into(), PathBuf::from("c.md"));
        mapping.insert("2022-12-31".into(), PathBuf::from("a.md"));
        mapping.insert("2023-01-15".into(), PathBuf::from("b.md"));

        let sorted = mapping.sorted_by_date();
        let dates: Vec<&str> = sorted.dates().collect();
        assert_eq!(dates, vec!["2022-12-31", "2023-01-15", "2023-03-01"]);
        assert_eq!(sorted.get("2023-03-01"), Some(Path::new("c.md")));
    }
}
