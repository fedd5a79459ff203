//! Validation of what users submit for analysis.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub const SAMPLE_INPUTS: &[&str] = &[
    "@johndoe",
    "https://twitter.com/username",
    "https://linkedin.com/in/profile",
    "username123",
    "https://instagram.com/account",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("Please enter a valid username or profile URL.")]
    InvalidHandle,

    #[error("Please upload .pdf, .docx, .txt files only.")]
    UnsupportedFileType { name: String },

    #[error("Please upload files smaller than 10MB.")]
    FileTooLarge { name: String, size: u64 },

    #[error("Please upload files or enter text to analyze.")]
    NothingToAnalyze,
}

impl IntakeError {
    /// Short heading for the user-facing notification.
    pub fn title(&self) -> &'static str {
        match self {
            IntakeError::InvalidHandle => "Invalid Input",
            IntakeError::UnsupportedFileType { .. } => "Invalid file type",
            IntakeError::FileTooLarge { .. } => "File too large",
            IntakeError::NothingToAnalyze => "No content to analyze",
        }
    }
}

fn username_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^@?[\w\-.]+$").ok())
        .as_ref()
}

/// Checks a handle or profile URL and returns it normalized
/// (trimmed, one trailing `/` removed).
pub fn normalize_handle(input: &str) -> Result<String, IntakeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::InvalidHandle);
    }
    let is_url = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    if !is_url && !username_pattern().is_some_and(|re| re.is_match(trimmed)) {
        return Err(IntakeError::InvalidHandle);
    }
    Ok(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn validate(&self) -> Result<(), IntakeError> {
        let extension = Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(IntakeError::UnsupportedFileType {
                name: self.name.clone(),
            });
        }
        if self.size > MAX_FILE_BYTES {
            return Err(IntakeError::FileTooLarge {
                name: self.name.clone(),
                size: self.size,
            });
        }
        Ok(())
    }
}

/// Files and free text collected for one upload analysis.
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    files: Vec<UploadFile>,
    pub text: String,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the valid files and returns the rejections.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadFile>) -> Vec<IntakeError> {
        let mut rejected = Vec::new();
        for file in files {
            match file.validate() {
                Ok(()) => self.files.push(file),
                Err(e) => rejected.push(e),
            }
        }
        rejected
    }

    pub fn remove_file(&mut self, index: usize) -> Option<UploadFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.text.trim().is_empty()
    }

    /// Simulated hand-off: validates there is content, then waits `latency`.
    pub async fn analyze(&self, latency: Duration) -> Result<(), IntakeError> {
        if self.is_empty() {
            return Err(IntakeError::NothingToAnalyze);
        }
        tokio::time::sleep(latency).await;
        Ok(())
    }
}
