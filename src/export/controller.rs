//! Export Controller: per-format job state and the parse → render → save run.
//!
//! Everything here is single-threaded. Job slots live in `RefCell`s and are
//! only borrowed for the duration of a state transition, never across a call
//! into an exporter or a save target, so a save target may call back into the
//! controller.

use std::cell::{Ref, RefCell};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::docx::DocxExporter;
use crate::error::{Error, Result};
use crate::model::parse_blocks;
use crate::pdf::PdfExporter;
use crate::template::resolve;

use super::{ExportFormat, Exporter};

/// File name used when the caller supplies a blank one.
pub const DEFAULT_FILE_NAME: &str = "resume";

/// Status of one format's export job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobState {
    #[default]
    Idle,
    InProgress,
    Failed(String),
}

impl JobState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Message of a failed job.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Inputs of one export, captured from the editor at trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub content: String,
    pub template_id: String,
    pub file_name: String,
}

impl ExportRequest {
    pub fn new(
        content: impl Into<String>,
        template_id: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            template_id: template_id.into(),
            file_name: file_name.into(),
        }
    }

    /// Reject blank content before any work is done.
    pub fn ensure_content(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(())
    }

    /// Output file name with the format's extension.
    ///
    /// Path separators and characters no file system accepts become `_`,
    /// leading dots are dropped, and a name with nothing left becomes
    /// [`DEFAULT_FILE_NAME`].
    pub fn file_name_for(&self, format: ExportFormat) -> String {
        let stem = sanitize_file_stem(&self.file_name);
        let stem = if stem.is_empty() {
            DEFAULT_FILE_NAME
        } else {
            stem.as_str()
        };
        format!("{stem}.{}", format.extension())
    }
}

fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned
        .trim()
        .trim_start_matches('.')
        .trim_end_matches(['.', ' '])
        .trim_start()
        .to_string()
}

/// Result of triggering an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The artifact was produced and handed to the save target.
    Saved { file_name: String, size: usize },
    /// The content is empty; nothing was attempted.
    Disabled,
    /// An export of this format is already running; the trigger was ignored.
    Busy,
    /// The export failed; the message is also stored in the job state.
    Failed(String),
}

/// Destination for finished artifacts (the "download").
pub trait SaveTarget {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

impl<T: SaveTarget + ?Sized> SaveTarget for &T {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        (**self).save(file_name, bytes)
    }
}

/// Saves artifacts as files in a directory, creating it if needed.
///
/// Files are written under a temporary name and renamed into place, so a
/// failed write never leaves a partial artifact behind.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectorySaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        let partial = self.dir.join(format!(".{file_name}.part"));
        if let Err(e) = fs::write(&partial, bytes) {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }
        fs::rename(&partial, &path)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

/// Keeps artifacts in memory, in save order.
#[derive(Debug, Default)]
pub struct MemorySaver {
    files: RefCell<Vec<(String, Vec<u8>)>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Ref<'_, Vec<(String, Vec<u8>)>> {
        self.files.borrow()
    }

    /// Bytes of the most recently saved file with this name.
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.clone())
    }

    pub fn take(&self) -> Vec<(String, Vec<u8>)> {
        self.files.take()
    }
}

impl SaveTarget for MemorySaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.files
            .borrow_mut()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// Runs PDF and Word exports with independent job state.
///
/// A PDF failure never touches the Word slot and vice versa. Triggering a
/// format while its job is in progress is a no-op.
pub struct ExportController<S, P = PdfExporter, D = DocxExporter> {
    saver: S,
    pdf: P,
    word: D,
    pdf_state: RefCell<JobState>,
    word_state: RefCell<JobState>,
}

impl<S: SaveTarget> ExportController<S> {
    /// Controller with the default PDF and Word exporters.
    pub fn new(saver: S) -> Self {
        Self::with_exporters(saver, PdfExporter::new(), DocxExporter::new())
    }
}

impl<S, P, D> ExportController<S, P, D>
where
    S: SaveTarget,
    P: Exporter,
    D: Exporter,
{
    pub fn with_exporters(saver: S, pdf: P, word: D) -> Self {
        Self {
            saver,
            pdf,
            word,
            pdf_state: RefCell::new(JobState::Idle),
            word_state: RefCell::new(JobState::Idle),
        }
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    /// Current state of a format's job.
    pub fn job_state(&self, format: ExportFormat) -> JobState {
        self.slot(format).borrow().clone()
    }

    /// Whether exports are offered for this content at all.
    pub fn is_export_enabled(&self, content: &str) -> bool {
        !content.trim().is_empty()
    }

    pub fn export_pdf(&self, request: &ExportRequest) -> ExportOutcome {
        self.export(ExportFormat::Pdf, request)
    }

    pub fn export_word(&self, request: &ExportRequest) -> ExportOutcome {
        self.export(ExportFormat::Word, request)
    }

    /// Parse, render and save one artifact, tracking the format's job state.
    pub fn export(&self, format: ExportFormat, request: &ExportRequest) -> ExportOutcome {
        if let Err(e) = request.ensure_content() {
            log::debug!("{format} export disabled: {e}");
            return ExportOutcome::Disabled;
        }

        {
            let mut state = self.slot(format).borrow_mut();
            if state.is_in_progress() {
                log::debug!("{format} export already in progress, ignoring trigger");
                return ExportOutcome::Busy;
            }
            *state = JobState::InProgress;
        }

        log::info!(
            "exporting {format} with template {:?}",
            request.template_id
        );
        let result = self.run(format, request);

        match result {
            Ok((file_name, size)) => {
                *self.slot(format).borrow_mut() = JobState::Idle;
                log::info!("{format} export finished: {file_name} ({size} bytes)");
                ExportOutcome::Saved { file_name, size }
            }
            Err(e) => {
                let message = e.to_string();
                log::error!("{format} export failed: {message}");
                *self.slot(format).borrow_mut() = JobState::Failed(message.clone());
                ExportOutcome::Failed(message)
            }
        }
    }

    fn run(&self, format: ExportFormat, request: &ExportRequest) -> Result<(String, usize)> {
        // Re-parsed on every export; the editor content may have changed.
        let doc = parse_blocks(&request.content)?;
        let tokens = resolve(&request.template_id);

        let mut buf = Cursor::new(Vec::new());
        match format {
            ExportFormat::Pdf => self.pdf.export(&doc, &tokens, &mut buf)?,
            ExportFormat::Word => self.word.export(&doc, &tokens, &mut buf)?,
        }
        let bytes = buf.into_inner();

        let file_name = request.file_name_for(format);
        self.saver.save(&file_name, &bytes)?;
        Ok((file_name, bytes.len()))
    }

    fn slot(&self, format: ExportFormat) -> &RefCell<JobState> {
        match format {
            ExportFormat::Pdf => &self.pdf_state,
            ExportFormat::Word => &self.word_state,
        }
    }
}
