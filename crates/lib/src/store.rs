//! Reading and writing structured documents on disk.
//!
//! Serialization is deterministic: writing the same logical document twice
//! yields byte-identical files, which is what lets the reconciler skip writes
//! for documents that are already up to date.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::{Document, Mapping};

/// Textual serialization of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Yaml,
  Json,
}

impl Format {
  pub fn as_str(self) -> &'static str {
    match self {
      Format::Yaml => "YAML",
      Format::Json => "JSON",
    }
  }
}

impl fmt::Display for Format {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Encoding or decoding failure for a specific format.
#[derive(Debug, Error)]
pub enum CodecError {
  #[error(transparent)]
  Yaml(#[from] serde_yaml::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("document not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to parse {} as {format}", path.display())]
  Parse {
    path: PathBuf,
    format: Format,
    #[source]
    source: CodecError,
  },

  #[error("failed to read {}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write {}", path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error("failed to serialize {format} document")]
  Serialize {
    format: Format,
    #[source]
    source: CodecError,
  },
}

/// Whether a document exists at `path`. Never errors.
pub fn exists(path: &Path) -> bool {
  path.exists()
}

/// Parse text in the given format.
///
/// An empty or `null` document parses as an empty mapping.
pub fn parse(text: &str, format: Format) -> Result<Document, CodecError> {
  if text.trim().is_empty() {
    return Ok(Document::Mapping(Mapping::new()));
  }

  let doc = match format {
    Format::Yaml => Document::try_from(serde_yaml::from_str::<serde_yaml::Value>(text)?)?,
    Format::Json => Document::from(serde_json::from_str::<serde_json::Value>(text)?),
  };

  Ok(if doc.is_null() { Document::Mapping(Mapping::new()) } else { doc })
}

/// Serialize a document in the given format.
///
/// JSON uses two-space indentation and ends with a newline.
pub fn serialize(doc: &Document, format: Format) -> Result<String, CodecError> {
  match format {
    Format::Yaml => Ok(serde_yaml::to_string(doc)?),
    Format::Json => {
      let mut out = serde_json::to_string_pretty(doc)?;
      out.push('\n');
      Ok(out)
    }
  }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// - `NotFound` if nothing exists at `path`
/// - `Parse` if the content is not valid in `format`
/// - `Read` for any other I/O failure
pub fn read(path: &Path, format: Format) -> Result<Document, StoreError> {
  let content = fs::read_to_string(path).map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => StoreError::NotFound {
      path: path.to_path_buf(),
    },
    // Bytes that are not UTF-8 cannot be a valid document either.
    io::ErrorKind::InvalidData => StoreError::Parse {
      path: path.to_path_buf(),
      format,
      source: invalid_utf8(format, e),
    },
    _ => StoreError::Read {
      path: path.to_path_buf(),
      source: e,
    },
  })?;

  parse(&content, format).map_err(|source| StoreError::Parse {
    path: path.to_path_buf(),
    format,
    source,
  })
}

/// Serialize `doc` and write it to `path`.
pub fn write(path: &Path, doc: &Document, format: Format) -> Result<(), StoreError> {
  let content = serialize(doc, format).map_err(|source| StoreError::Serialize { format, source })?;
  write_string(path, &content)
}

/// Write already-serialized content to `path`.
///
/// Uses atomic write (write to temp, then rename) so a failed write never
/// leaves a truncated document behind. A symlink is followed so the link
/// itself stays in place, and an existing file keeps its permissions.
pub fn write_string(path: &Path, content: &str) -> Result<(), StoreError> {
  let target = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
  let temp_path = temp_path_for(&target);
  let write_err = |source| StoreError::Write {
    path: path.to_path_buf(),
    source,
  };

  fs::write(&temp_path, content).map_err(write_err)?;

  let finish = match fs::metadata(&target) {
    Ok(meta) => fs::set_permissions(&temp_path, meta.permissions()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e),
  }
  .and_then(|()| fs::rename(&temp_path, &target));

  finish.map_err(|source| {
    let _ = fs::remove_file(&temp_path);
    write_err(source)
  })
}

/// Copy the raw bytes at `path` to `path` + `suffix` and return the copy's path.
///
/// An existing file at the destination is overwritten.
pub fn quarantine(path: &Path, suffix: &str) -> Result<PathBuf, StoreError> {
  let mut backup = path.as_os_str().to_os_string();
  backup.push(suffix);
  let backup = PathBuf::from(backup);

  let bytes = fs::read(path).map_err(|source| StoreError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  fs::write(&backup, bytes).map_err(|source| StoreError::Write {
    path: backup.clone(),
    source,
  })?;

  Ok(backup)
}

fn temp_path_for(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}

fn invalid_utf8(format: Format, err: io::Error) -> CodecError {
  match format {
    Format::Yaml => CodecError::Yaml(serde::de::Error::custom(err)),
    Format::Json => CodecError::Json(serde::de::Error::custom(err)),
  }
}
