use std::io::Write;
use std::path::Path;

use oric_hires::{codec, PictureDocument};
use tempfile::NamedTempFile;

use crate::error::DocumentError;

/// Load a `.s` picture from disk.
pub fn open(path: &Path) -> Result<PictureDocument, DocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = codec::decode(&text).map_err(|source| DocumentError::Picture {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), label = document.label(), "Opened picture");
    Ok(document)
}

/// Write a picture to disk atomically.
///
/// The picture is encoded before anything is written, so a canvas that
/// breaks the attribute rules leaves an existing file untouched. The data
/// goes to a temporary file next to `path` which is then renamed over it.
pub fn save(document: &PictureDocument, path: &Path) -> Result<(), DocumentError> {
    let text = codec::encode(document)?;
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %path.display(), bytes = text.len(), "Saved picture");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oric_hires::{CellConflict, HiresError, OricColour};

    #[test]
    fn test_save_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.s");
        let mut doc = PictureDocument::new();
        doc.canvas_mut().paint(100, 100, OricColour::White, 6).unwrap();

        save(&doc, &path).unwrap();
        assert_eq!(open(&path).unwrap(), doc);
    }

    #[test]
    fn test_failed_save_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.s");
        save(&PictureDocument::new(), &path).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut doc = PictureDocument::new();
        doc.canvas_mut().paint(0, 0, OricColour::Red, 1).unwrap();
        doc.canvas_mut().paint(1, 0, OricColour::Green, 1).unwrap();
        let err = save(&doc, &path).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Encode(HiresError::NonConformantCell {
                row: 0,
                cell: 0,
                conflict: CellConflict::TooManyColours(3)
            })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let err = open(Path::new("/nonexistent/pic.s")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_open_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.s");
        std::fs::write(&path, "_Pic\n\t.byt $40\n").unwrap();
        let err = open(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Picture { .. }));
        assert!(err.to_string().contains("bad.s"));
        assert!(err.to_string().contains("truncated at row 0"));
    }
}
