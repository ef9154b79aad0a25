use std::path::Path;

use crate::utils::Result;

/// A CSV file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl CsvFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transactions.csv".to_string());

        tracing::debug!("Read {} bytes from {:?}", bytes.len(), path);

        Ok(Self::new(name, bytes))
    }
}

/// A validated submission, ready to send to a verdict provider
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    /// Trimmed wallet address plus its transaction export
    Upload { address: String, file: CsvFile },
    /// User-supplied JSON, forwarded without modification
    Payload(serde_json::Value),
}

impl AnalysisRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Upload { .. } => "upload",
            AnalysisRequest::Payload(_) => "payload",
        }
    }
}
