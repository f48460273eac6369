//! Reading files picked in an `<input type="file">` into [`Attachment`]s.

use forms::Attachment;
use js_sys::Uint8Array;
use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FileReadError {
    #[error("could not read `{name}`: {reason}")]
    Read { name: String, reason: String },
}

/// Reads every file of `list`, in selection order.
///
/// # Errors
///
/// Returns [`FileReadError::Read`] for the first file the browser fails to read.
pub async fn read_file_list(list: &FileList) -> Result<Vec<Attachment>, FileReadError> {
    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        files.push(read_file(&file).await?);
    }
    Ok(files)
}

async fn read_file(file: &File) -> Result<Attachment, FileReadError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| FileReadError::Read {
            name: file.name(),
            reason: format!("{err:?}"),
        })?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(Attachment::new(file.name(), file.type_(), bytes))
}

/// Numbers the selections made in one file input.
///
/// Reads finish in any order; only the result of the latest selection may be
/// stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionCounter {
    latest: u64,
}

impl SelectionCounter {
    /// Starts a new selection, making every earlier ticket stale.
    pub const fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    #[must_use]
    pub const fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

/// Short summary shown under a file input, e.g. `3 file(s) selected / 10 max`.
#[must_use]
pub fn selection_summary(count: usize, max_count: Option<usize>) -> String {
    match max_count {
        Some(max) => format!("{count} file(s) selected / {max} max"),
        None => format!("{count} file(s) selected"),
    }
}
