//! Exported manifest documents
//!
//! Reads a single exported file into a generic Kubernetes object and writes
//! it back to the same path in the export's format. Only the owner reference
//! list is ever modified; everything else is carried through untouched.

use crate::models::OutputFormat;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::DynamicObject;
use std::path::{Path, PathBuf};

/// Encoding failures for either supported format
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors reading or writing an exported document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A decoded exported manifest
#[derive(Debug, Clone)]
pub struct ExportedObject {
    inner: DynamicObject,
}

impl ExportedObject {
    pub fn new(inner: DynamicObject) -> Self {
        Self { inner }
    }

    /// Decode a document in the given format
    pub fn decode(contents: &str, format: OutputFormat) -> Result<Self, FormatError> {
        let inner = match format {
            OutputFormat::Yaml => serde_yaml::from_str(contents)?,
            OutputFormat::Json => serde_json::from_str(contents)?,
        };
        Ok(Self { inner })
    }

    /// Encode the document in the given format
    pub fn encode(&self, format: OutputFormat) -> Result<String, FormatError> {
        match format {
            OutputFormat::Yaml => Ok(serde_yaml::to_string(&self.inner)?),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&self.inner)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Namespace of the object, empty for cluster-scoped objects
    pub fn namespace(&self) -> &str {
        self.inner.metadata.namespace.as_deref().unwrap_or("")
    }

    /// Object name, empty if the export carries none
    pub fn name(&self) -> &str {
        self.inner.metadata.name.as_deref().unwrap_or("")
    }

    pub fn owner_references(&self) -> &[OwnerReference] {
        self.inner.metadata.owner_references.as_deref().unwrap_or(&[])
    }

    /// Replace the whole owner reference list
    pub fn set_owner_references(&mut self, refs: Vec<OwnerReference>) {
        self.inner.metadata.owner_references = if refs.is_empty() { None } else { Some(refs) };
    }

    pub fn as_dynamic(&self) -> &DynamicObject {
        &self.inner
    }
}

/// Read and write access to exported documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentAccessor: Send + Sync {
    /// Read and decode the document at `path`
    async fn read(&self, path: &Path) -> Result<ExportedObject, DocumentError>;

    /// Encode `object` and overwrite the document at `path`
    async fn write(&self, path: &Path, object: &ExportedObject) -> Result<(), DocumentError>;
}

/// Documents stored on the local filesystem in a single output format
#[derive(Debug, Clone, Copy)]
pub struct FileDocuments {
    format: OutputFormat,
}

impl FileDocuments {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

#[async_trait]
impl DocumentAccessor for FileDocuments {
    async fn read(&self, path: &Path) -> Result<ExportedObject, DocumentError> {
        tracing::debug!("Reading document: {}", path.display());

        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DocumentError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        ExportedObject::decode(&contents, self.format).map_err(|source| DocumentError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn write(&self, path: &Path, object: &ExportedObject) -> Result<(), DocumentError> {
        tracing::debug!("Writing document: {}", path.display());

        let contents = object
            .encode(self.format)
            .map_err(|source| DocumentError::Encode {
                path: path.to_path_buf(),
                source,
            })?;

        tokio::fs::write(path, contents)
            .await
            .map_err(|source| DocumentError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
