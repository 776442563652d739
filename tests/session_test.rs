//! Editing sessions against files on disk.

mod common;

use common::{fixtures, FakePictConv};
use oric_hires::{CellConflict, HiresError, OricColour};
use oric_picture::error::DocumentError;
use oric_picture::rendering;
use oric_picture::services::{CompilePipeline, Session};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn pipeline() -> CompilePipeline {
    CompilePipeline::new(Arc::new(FakePictConv::default()))
}

#[test]
fn test_open_edit_save_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_picture(dir.path(), "pic.s", &fixtures::banded_document());

    let mut session = Session::open(&path, pipeline()).unwrap();
    assert!(!session.is_dirty());
    session
        .document_mut()
        .canvas_mut()
        .paint(120, 10, OricColour::Black, 2)
        .unwrap();
    assert!(session.is_dirty());
    session.save().unwrap();
    assert!(!session.is_dirty());

    let reopened = Session::open(&path, pipeline()).unwrap();
    assert_eq!(reopened.document(), session.document());
}

#[test]
fn test_non_conformant_save_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_picture(dir.path(), "pic.s", &fixtures::banded_document());
    let before = std::fs::read_to_string(&path).unwrap();

    let mut session = Session::open(&path, pipeline()).unwrap();
    session.replace_document(fixtures::three_colour_document());
    let err = session.save().unwrap_err();

    assert!(matches!(
        err,
        DocumentError::Encode(HiresError::NonConformantCell {
            row: 3,
            cell: 5,
            conflict: CellConflict::TooManyColours(3),
        })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    assert!(session.is_dirty());
}

#[tokio::test]
async fn test_compile_then_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixed.s");
    let mut session = Session::new(fixtures::LABEL, pipeline());
    session.replace_document(fixtures::three_colour_document());

    session.compile().await.unwrap();
    session.save_as(&path).unwrap();

    let reopened = Session::open(&path, pipeline()).unwrap();
    assert_eq!(reopened.document(), session.document());
}

#[test]
fn test_export_png_matches_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("out.png");
    let mut session = Session::new(fixtures::LABEL, pipeline());
    session.replace_document(fixtures::banded_document());

    session.export_png(&png).unwrap();
    let image = rendering::read_png(&png).unwrap();
    assert_eq!(image.as_bytes(), session.document().canvas().to_rgb().as_slice());
}

#[test]
fn test_row_background_is_idempotent_through_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_picture(dir.path(), "pic.s", &fixtures::banded_document());

    let mut session = Session::open(&path, pipeline()).unwrap();
    let canvas = session.document_mut().canvas_mut();
    // Row 30 lies in the solid red band.
    let first = canvas.replace_row_background(30, OricColour::Blue).unwrap();
    let second = canvas.replace_row_background(30, OricColour::Blue).unwrap();
    assert_eq!(first, 240);
    assert_eq!(second, 0);
    session.save().unwrap();

    let reopened = Session::open(&path, pipeline()).unwrap();
    let canvas = reopened.document().canvas();
    assert!(canvas.row(30).iter().all(|&c| c == OricColour::Blue));
    assert!(canvas.row(31).iter().all(|&c| c == OricColour::Red));
}
