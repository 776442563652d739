//! Compile pipeline tests: fake converters plus real subprocesses.

mod common;

use common::{fixtures, FailingConverter, FakePictConv};
use oric_hires::{codec, OricColour};
use oric_picture::error::CompileError;
use oric_picture::services::{CompilePipeline, Converter, PictConv, Session};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_compile_makes_free_paint_encodable() {
    let converter = Arc::new(FakePictConv::default());
    let pipeline = CompilePipeline::new(converter.clone());
    let doc = fixtures::three_colour_document();
    assert!(codec::encode(&doc).is_err());

    let output = pipeline.compile(&doc).await.unwrap();
    assert_eq!(converter.runs(), 1);
    assert_eq!(output.log, "fake pictconv: _LabelPicture\n");
    assert_eq!(output.document.label(), doc.label());
    assert!(codec::encode(&output.document).is_ok());
    // The input is borrowed, never modified.
    assert_eq!(doc, fixtures::three_colour_document());
}

#[tokio::test]
async fn test_converter_failure_leaves_session_unchanged() {
    let pipeline = CompilePipeline::new(Arc::new(FailingConverter::new(2, "PNG too small")));
    let mut session = Session::new(fixtures::LABEL, pipeline);
    session
        .document_mut()
        .canvas_mut()
        .paint(50, 50, OricColour::Magenta, 10)
        .unwrap();
    let before = session.document().clone();

    let err = session.compile().await.unwrap_err();
    match err {
        CompileError::ConverterFailed { exit_code, log } => {
            assert_eq!(exit_code, Some(2));
            assert_eq!(log, "PNG too small");
        }
        other => panic!("Expected ConverterFailed, got {other:?}"),
    }
    assert_eq!(session.document(), &before);
    assert!(session.is_dirty());
}

#[tokio::test]
async fn test_session_compile_swaps_document_on_success() {
    let mut session = Session::new(
        fixtures::LABEL,
        CompilePipeline::new(Arc::new(FakePictConv::default())),
    );
    session.replace_document(fixtures::three_colour_document());

    session.compile().await.unwrap();
    assert!(session.document().canvas().non_conformant_cells().is_empty());
    assert!(session.is_dirty());
}

#[tokio::test]
async fn test_import_fits_png_and_converts() {
    let dir = tempfile::tempdir().unwrap();
    let png = fixtures::two_tone_png(dir.path());
    let mut session = Session::new(
        "_Import",
        CompilePipeline::new(Arc::new(FakePictConv::default())),
    );

    let log = session.import_png(&png).await.unwrap();
    assert_eq!(log, "fake pictconv: _Import\n");

    let canvas = session.document().canvas();
    assert_eq!(session.document().label(), "_Import");
    assert_eq!(canvas.sample(0, 100).unwrap(), OricColour::Red);
    assert_eq!(canvas.sample(239, 100).unwrap(), OricColour::Blue);
}

#[tokio::test]
async fn test_import_missing_png_is_render_error() {
    let mut session = Session::new(
        fixtures::LABEL,
        CompilePipeline::new(Arc::new(FakePictConv::default())),
    );
    let err = session
        .import_png(Path::new("/nonexistent/picture.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompileError::Render(_)), "{err:?}");
    assert_eq!(session.document().canvas().histogram()[0], 48_000);
}

#[cfg(unix)]
mod subprocess {
    use super::*;
    use common::converters::script;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_pictconv_receives_hires_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let canned = fixtures::write_picture(dir.path(), "canned.s", &fixtures::banded_document());
        let program = script(
            dir.path(),
            "pictconv",
            &format!(
                "echo \"$@\"\nfor last; do :; done\ncp '{}' \"$last\"",
                canned.display()
            ),
        );

        let pipeline = CompilePipeline::new(Arc::new(PictConv::new(
            &program,
            Duration::from_secs(10),
        )));
        let output = pipeline
            .compile(&fixtures::three_colour_document())
            .await
            .unwrap();

        assert!(
            output.log.starts_with("-f6 -d0 -o4_LabelPicture "),
            "log: {}",
            output.log
        );
        assert!(output.log.contains("in.png"));
        assert_eq!(output.document, fixtures::banded_document());
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_code_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "pictconv", "echo 'bad header' >&2\nexit 3");

        let converter = PictConv::new(&program, Duration::from_secs(10));
        let err = converter
            .convert(Path::new("in.png"), Path::new("out.s"), "_Pic")
            .await
            .unwrap_err();
        match err {
            CompileError::ConverterFailed { exit_code, log } => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(log, "bad header\n");
            }
            other => panic!("Expected ConverterFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_kills_converter() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "pictconv", "sleep 30");

        let pipeline = CompilePipeline::new(Arc::new(PictConv::new(
            &program,
            Duration::from_secs(1),
        )));
        let started = std::time::Instant::now();
        let err = pipeline
            .compile(&fixtures::banded_document())
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(10));
        match err {
            CompileError::ConverterFailed { exit_code, log } => {
                assert_eq!(exit_code, None);
                assert_eq!(log, "timed out after 1s");
            }
            other => panic!("Expected ConverterFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clean_exit_without_output_fails() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "pictconv", "echo converted");

        let pipeline = CompilePipeline::new(Arc::new(PictConv::new(
            &program,
            Duration::from_secs(10),
        )));
        let err = pipeline
            .compile(&fixtures::banded_document())
            .await
            .unwrap_err();
        match err {
            CompileError::ConverterFailed { exit_code, log } => {
                assert_eq!(exit_code, Some(0));
                assert_eq!(log, "converted\nno output file produced");
            }
            other => panic!("Expected ConverterFailed, got {other:?}"),
        }
    }
}
