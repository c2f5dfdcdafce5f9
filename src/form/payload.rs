//! Form payload captured at submission time.

use std::path::Path;

use reqwest::multipart::{Form, Part};

/// Value of a single form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    /// A text input, select, or textarea value.
    Text(String),
    /// A selected file.
    File {
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl FormField {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn file(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        Self::File {
            content_type: Some(guess_content_type(&file_name).to_string()),
            file_name,
            bytes: bytes.into(),
        }
    }

    /// Read a file input's contents from disk.
    pub async fn file_from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::file(file_name, bytes))
    }

    fn into_part(self) -> Result<Part, reqwest::Error> {
        match self {
            FormField::Text(value) => Ok(Part::text(value)),
            FormField::File {
                file_name,
                content_type,
                bytes,
            } => {
                let part = Part::bytes(bytes).file_name(file_name);
                match content_type {
                    Some(ct) => part.mime_str(&ct),
                    None => Ok(part),
                }
            }
        }
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "dbf" => "application/dbase",
        "fpt" => "application/octet-stream",
        "json" => "application/json",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
}

/// Snapshot of every field of a form, in document order.
///
/// Names may repeat (multi-file inputs contribute one entry per file).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    entries: Vec<(String, FormField)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, field: FormField) {
        self.entries.push((name.into(), field));
    }

    pub fn with(mut self, name: impl Into<String>, field: FormField) -> Self {
        self.push(name, field);
        self
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Every value submitted under `name`.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormField> + 'a {
        self.entries.iter().filter(move |(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn entries(&self) -> &[(String, FormField)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of file entries.
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, f)| matches!(f, FormField::File { .. }))
            .count()
    }

    /// Encode as a `multipart/form-data` body.
    ///
    /// Fails only if a file entry carries a malformed content type.
    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        self.entries
            .into_iter()
            .try_fold(Form::new(), |form, (name, field)| {
                Ok(form.part(name, field.into_part()?))
            })
    }
}
