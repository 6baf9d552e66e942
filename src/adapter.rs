//! The adapter contract: argv in, one envelope out.
//!
//! [`run`] is the error boundary. Whatever fails inside it, whether the
//! argument check, engine construction, the engine call or a panic in the
//! engine, ends up as the `error` field of the returned [`Envelope`] with exit
//! code 1.

use std::any::Any;
use std::ffi::OsString;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use crate::core::{
    AdapterError, EXIT_FAILURE, EXIT_SUCCESS, LINE_SEPARATOR, USE_ANGLE_CLASSIFICATION,
};
use crate::engine::{LineRecord, OcrEngine};
use crate::envelope::Envelope;

/// Command-line arguments of the adapter.
///
/// Positional values only; the first one is the image path and the rest are
/// ignored. Help and version flags are disabled and [`Invocation::from_args`]
/// puts every argument after clap's `--` escape, so flag-looking values, a
/// literal `--` and the empty string all arrive as data.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "ocr-adapter",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Invocation {
    /// Image path followed by ignored arguments.
    #[arg(value_parser = clap::value_parser!(OsString))]
    args: Vec<OsString>,
}

impl Invocation {
    /// An invocation for `image_path`.
    pub fn new(image_path: Option<PathBuf>) -> Self {
        Self {
            args: image_path.map(PathBuf::into_os_string).into_iter().collect(),
        }
    }

    /// Parses an argument vector, program name first.
    ///
    /// Never exits the process: a parse failure is returned as
    /// [`AdapterError::InvalidArguments`].
    pub fn from_args<I, T>(args: I) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args = args.into_iter().map(Into::into);
        let escaped = args
            .next()
            .into_iter()
            .chain(std::iter::once(OsString::from("--")))
            .chain(args);
        Self::try_parse_from(escaped).map_err(invalid_arguments)
    }

    /// The image path, the first positional argument.
    pub fn image_path(&self) -> Option<&Path> {
        self.args.first().map(Path::new)
    }

    /// Number of arguments after the image path.
    pub fn ignored_args(&self) -> usize {
        self.args.len().saturating_sub(1)
    }
}

/// Keeps the first line of clap's rendering without its `error: ` prefix.
fn invalid_arguments(err: clap::Error) -> AdapterError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default().trim();
    let message = first_line.strip_prefix("error:").unwrap_or(first_line).trim();
    AdapterError::InvalidArguments(message.to_string())
}

/// Envelope and exit code of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// What to print on standard output.
    pub envelope: Envelope,
    /// Process exit code.
    pub exit_code: u8,
}

impl Outcome {
    fn success(text: String) -> Self {
        Self {
            envelope: Envelope::success(text),
            exit_code: EXIT_SUCCESS,
        }
    }

    /// Outcome reporting `error`.
    pub fn failure(error: &AdapterError) -> Self {
        Self {
            envelope: Envelope::failure(error),
            exit_code: EXIT_FAILURE,
        }
    }

    /// The exit code as a process [`ExitCode`].
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code)
    }
}

/// Runs one invocation against the engine produced by `build_engine`.
///
/// The engine is only built once an image path is known to be present.
pub fn run<E, F>(invocation: &Invocation, build_engine: F) -> Outcome
where
    E: OcrEngine,
    F: FnOnce() -> Result<E, AdapterError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| recognize(invocation, build_engine)))
        .unwrap_or_else(|payload| Err(AdapterError::EnginePanic(panic_message(payload.as_ref()))));

    match result {
        Ok(text) => Outcome::success(text),
        Err(err) => {
            error!("{}", err.message());
            Outcome::failure(&err)
        }
    }
}

fn recognize<E, F>(invocation: &Invocation, build_engine: F) -> Result<String, AdapterError>
where
    E: OcrEngine,
    F: FnOnce() -> Result<E, AdapterError>,
{
    let image_path = invocation
        .image_path()
        .ok_or(AdapterError::MissingImagePath)?;
    let ignored = invocation.ignored_args();
    if ignored > 0 {
        debug!(count = ignored, "ignoring extra arguments");
    }

    let engine = build_engine()?;
    let records = engine.ocr(image_path, USE_ANGLE_CLASSIFICATION)?;
    Ok(extract_text(records.as_deref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Joins the text of every well-formed record with a newline, in engine order.
///
/// Records without a recognition are skipped.
pub fn extract_text(records: Option<&[LineRecord]>) -> String {
    let Some(records) = records else {
        return String::new();
    };

    let texts: Vec<&str> = records.iter().filter_map(LineRecord::text).collect();
    let skipped = records.len() - texts.len();
    if skipped > 0 {
        debug!(skipped, "skipped line records without recognized text");
    }
    debug!(lines = texts.len(), "extracted text lines");

    texts.join(LINE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Engine returning canned output and recording how it was called.
    struct FakeEngine {
        output: Option<Vec<LineRecord>>,
        fail_with: Option<&'static str>,
        panics: bool,
        classified: Cell<Option<bool>>,
        seen_path: Cell<Option<PathBuf>>,
    }

    impl FakeEngine {
        fn returning(output: Option<Vec<LineRecord>>) -> Self {
            Self {
                output,
                fail_with: None,
                panics: false,
                classified: Cell::new(None),
                seen_path: Cell::new(None),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                output: None,
                fail_with: Some(message),
                panics: false,
                classified: Cell::new(None),
                seen_path: Cell::new(None),
            }
        }

        fn panicking() -> Self {
            Self {
                panics: true,
                ..Self::returning(None)
            }
        }
    }

    impl OcrEngine for &FakeEngine {
        fn ocr(
            &self,
            image_path: &Path,
            classify: bool,
        ) -> Result<Option<Vec<LineRecord>>, AdapterError> {
            self.classified.set(Some(classify));
            self.seen_path.set(Some(image_path.to_path_buf()));
            if self.panics {
                panic!("session output missing");
            }
            match self.fail_with {
                Some(message) => Err(AdapterError::Reported(message.to_string())),
                None => Ok(self.output.clone()),
            }
        }
    }

    fn photo() -> Invocation {
        Invocation::new(Some(PathBuf::from("photo.png")))
    }

    fn line(text: &str, confidence: f32) -> LineRecord {
        LineRecord::recognized(
            vec![(0.0, 0.0), (100.0, 0.0), (100.0, 20.0), (0.0, 20.0)],
            text,
            Some(confidence),
        )
    }

    #[test]
    fn test_missing_path_reports_error_without_building_engine() {
        let engine = FakeEngine::returning(None);
        let built = Cell::new(false);
        let outcome = run(&Invocation::new(None), || {
            built.set(true);
            Ok(&engine)
        });
        assert!(!built.get());
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(
            outcome.envelope.error.as_deref(),
            Some("No image path provided")
        );
        assert_eq!(outcome.envelope.text, "");
    }

    #[test]
    fn test_null_result_is_empty_success() {
        let engine = FakeEngine::returning(None);
        let outcome = run(&photo(), || Ok(&engine));
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.envelope, Envelope::success(""));
    }

    #[test]
    fn test_empty_result_is_empty_success() {
        let engine = FakeEngine::returning(Some(Vec::new()));
        let outcome = run(&photo(), || Ok(&engine));
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(
            outcome.envelope.to_line().unwrap(),
            r#"{"text":"","error":null}"#
        );
    }

    #[test]
    fn test_lines_are_joined_in_engine_order() {
        let engine =
            FakeEngine::returning(Some(vec![line("こんにちは", 0.99), line("世界", 0.95)]));
        let outcome = run(&photo(), || Ok(&engine));
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.envelope.text, "こんにちは\n世界");
        assert_eq!(outcome.envelope.error, None);
    }

    #[test]
    fn test_angle_classification_is_requested() {
        let engine = FakeEngine::returning(None);
        run(&photo(), || Ok(&engine));
        assert_eq!(engine.classified.get(), Some(true));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let engine = FakeEngine::returning(Some(vec![
            LineRecord::unrecognized(Vec::new()),
            line("first", 0.9),
            LineRecord::default(),
            line("second", 0.8),
        ]));
        let outcome = run(&photo(), || Ok(&engine));
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.envelope.text, "first\nsecond");
    }

    #[test]
    fn test_engine_call_failure_is_reported_verbatim() {
        let engine = FakeEngine::failing("file not found");
        let outcome = run(&Invocation::new(Some("missing.png".into())), || Ok(&engine));
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.envelope.error.as_deref(), Some("file not found"));
        assert_eq!(outcome.envelope.text, "");
    }

    #[test]
    fn test_engine_construction_failure_is_reported() {
        let outcome = run::<&FakeEngine, _>(&photo(), || {
            Err(AdapterError::ModelNotFound {
                path: PathBuf::from("models/pp-ocrv5_mobile_det.onnx"),
            })
        });
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(
            outcome.envelope.error.as_deref(),
            Some("model file not found: models/pp-ocrv5_mobile_det.onnx")
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let engine = FakeEngine::returning(Some(vec![line("同じ", 0.9)]));
        let first = run(&photo(), || Ok(&engine));
        let second = run(&photo(), || Ok(&engine));
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_text_handles_none_and_empty() {
        assert_eq!(extract_text(None), "");
        assert_eq!(extract_text(Some(&[][..])), "");
    }

    #[test]
    fn test_extract_text_keeps_empty_recognitions() {
        let records = [line("a", 0.5), line("", 0.1), line("b", 0.5)];
        assert_eq!(extract_text(Some(&records[..])), "a\n\nb");
    }

    #[test]
    fn test_engine_panic_becomes_envelope() {
        let engine = FakeEngine::panicking();
        let outcome = run(&photo(), || Ok(&engine));
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(
            outcome.envelope.error.as_deref(),
            Some("engine panicked: session output missing")
        );
        assert_eq!(outcome.envelope.text, "");
    }

    #[test]
    fn test_construction_panic_becomes_envelope() {
        let outcome = run::<&FakeEngine, _>(&photo(), || panic!("{} models", 0));
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(
            outcome.envelope.error.as_deref(),
            Some("engine panicked: 0 models")
        );
    }

    #[test]
    fn test_args_without_path() {
        let invocation = Invocation::from_args(["ocr-adapter"]).unwrap();
        assert_eq!(invocation.image_path(), None);
    }

    #[test]
    fn test_args_first_positional_is_path() {
        let invocation = Invocation::from_args(["ocr-adapter", "photo.png", "extra"]).unwrap();
        assert_eq!(invocation.image_path(), Some(Path::new("photo.png")));
        assert_eq!(invocation.ignored_args(), 1);
    }

    #[test]
    fn test_args_flag_like_values_are_paths() {
        let invocation = Invocation::from_args(["ocr-adapter", "--help"]).unwrap();
        assert_eq!(invocation.image_path(), Some(Path::new("--help")));
        let invocation = Invocation::from_args(["ocr-adapter", "-v", "--version"]).unwrap();
        assert_eq!(invocation.image_path(), Some(Path::new("-v")));
    }

    #[test]
    fn test_args_double_dash_is_a_path() {
        let invocation = Invocation::from_args(["ocr-adapter", "--"]).unwrap();
        assert_eq!(invocation.image_path(), Some(Path::new("--")));

        let invocation = Invocation::from_args(["ocr-adapter", "--", "a.png"]).unwrap();
        assert_eq!(invocation.image_path(), Some(Path::new("--")));
        assert_eq!(invocation.ignored_args(), 1);
    }

    #[test]
    fn test_args_empty_path_reaches_engine() {
        let invocation = Invocation::from_args(["ocr-adapter", ""]).unwrap();
        assert_eq!(invocation.image_path(), Some(Path::new("")));

        let engine = FakeEngine::failing("file not found");
        let outcome = run(&invocation, || Ok(&engine));
        assert_eq!(engine.seen_path.take(), Some(PathBuf::new()));
        assert_eq!(outcome.envelope.error.as_deref(), Some("file not found"));
    }

    #[test]
    fn test_invalid_arguments_message_is_trimmed() {
        let err = clap::Error::raw(clap::error::ErrorKind::InvalidUtf8, "bad value\n");
        match invalid_arguments(err) {
            AdapterError::InvalidArguments(message) => assert_eq!(message, "bad value"),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[test]
    fn test_new_matches_parsed() {
        assert_eq!(
            Invocation::new(Some(PathBuf::from("photo.png"))),
            Invocation::from_args(["ocr-adapter", "photo.png"]).unwrap()
        );
        assert_eq!(
            Invocation::new(None),
            Invocation::from_args(["ocr-adapter"]).unwrap()
        );
    }
}
