//! Day-keyed snapshot history and its backing stores.
//!
//! The history is a list of [`Snapshot`]s holding at most one entry per
//! calendar date. Upserting a date that is already present replaces that
//! day's categories in place; a new date is appended at the end. Nothing is
//! ever removed.
//!
//! [`JsonFileStore`] keeps the history in a single pretty-printed JSON file
//! and rewrites the whole file on every upsert. It assumes a single process
//! owns the file: there is no cross-process lock, so two writers racing on
//! the same path can lose an update.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use tracing::{debug, info};

use crate::config;
use crate::error::Result;
use crate::models::{CategoryPoint, Snapshot};

/// What an upsert did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// A snapshot for the date already existed; its categories were replaced.
    Replaced { position: usize },
    /// No snapshot for the date existed; one was appended.
    Inserted { position: usize },
}

impl UpsertOutcome {
    pub fn position(&self) -> usize {
        match *self {
            UpsertOutcome::Replaced { position } | UpsertOutcome::Inserted { position } => position,
        }
    }
}

/// Insert-or-replace `categories` as the snapshot for `date`.
///
/// The whole category list of an existing day is overwritten, never merged
/// sector by sector.
pub fn upsert_snapshot(
    history: &mut Vec<Snapshot>,
    date: NaiveDate,
    categories: Vec<CategoryPoint>,
) -> UpsertOutcome {
    match history.iter().position(|s| s.date == date) {
        Some(position) => {
            history[position].categories = categories;
            UpsertOutcome::Replaced { position }
        }
        None => {
            history.push(Snapshot::new(date, categories));
            UpsertOutcome::Inserted {
                position: history.len() - 1,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Persistence for the snapshot history.
pub trait Store {
    /// Return the full history, oldest insertion first.
    fn load(&self) -> Result<Vec<Snapshot>>;

    /// Record `categories` as the snapshot for `today`.
    fn upsert(&mut self, today: NaiveDate, categories: Vec<CategoryPoint>)
        -> Result<UpsertOutcome>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn load(&self) -> Result<Vec<Snapshot>> {
        (**self).load()
    }

    fn upsert(
        &mut self,
        today: NaiveDate,
        categories: Vec<CategoryPoint>,
    ) -> Result<UpsertOutcome> {
        (**self).upsert(today, categories)
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// History stored as a JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the whole history and swap it into place.
    ///
    /// Writes to a temp file next to the target and renames it over the
    /// old file, so an interrupted write leaves the previous history intact.
    /// The replaced file's permissions carry over to the new one.
    fn write_all(&self, history: &[Snapshot]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, HistoryFormatter::new());
        history.serialize(&mut ser)?;

        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        let new_file_mode = {
            use std::os::unix::fs::PermissionsExt;
            // Same mode a plain create would get; the umask still applies.
            fs::Permissions::from_mode(0o666)
        };
        #[cfg(unix)]
        builder.permissions(new_file_mode);

        let mut tmp = builder.tempfile_in(&dir)?;
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.write_all(&buf)?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(config::DEFAULT_DATA_FILE)
    }
}

impl Store for JsonFileStore {
    /// A missing file means no data has been recorded yet.
    fn load(&self) -> Result<Vec<Snapshot>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No history file yet");
            return Ok(Vec::new());
        }
        let contents = fs::read(&self.path)?;
        let history: Vec<Snapshot> = serde_json::from_slice(&contents)?;
        debug!(
            path = %self.path.display(),
            snapshots = history.len(),
            "Loaded history"
        );
        Ok(history)
    }

    fn upsert(
        &mut self,
        today: NaiveDate,
        categories: Vec<CategoryPoint>,
    ) -> Result<UpsertOutcome> {
        let mut history = self.load()?;
        let count = categories.len();
        let outcome = upsert_snapshot(&mut history, today, categories);
        self.write_all(&history)?;
        info!(
            path = %self.path.display(),
            date = %today.format(config::DATE_FORMAT),
            categories = count,
            ?outcome,
            "Wrote snapshot"
        );
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// History kept in memory only. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    history: Vec<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history.
    pub fn with_history(history: Vec<Snapshot>) -> Self {
        Self { history }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Vec<Snapshot>> {
        Ok(self.history.clone())
    }

    fn upsert(
        &mut self,
        today: NaiveDate,
        categories: Vec<CategoryPoint>,
    ) -> Result<UpsertOutcome> {
        Ok(upsert_snapshot(&mut self.history, today, categories))
    }
}

// ---------------------------------------------------------------------------
// HistoryFormatter
// ---------------------------------------------------------------------------

/// Four-space pretty printer that writes every character outside printable
/// ASCII as a `\uXXXX` escape (UTF-16, lowercase hex), the layout the
/// history file has always had.
struct HistoryFormatter {
    pretty: PrettyFormatter<'static>,
}

impl HistoryFormatter {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for HistoryFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
