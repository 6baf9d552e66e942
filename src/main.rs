//! `ocr-adapter <image-path>`
//!
//! Prints exactly one JSON line on standard output and exits with 0 on success
//! or 1 on any failure. Diagnostics go to standard error when `RUST_LOG` is set.

use std::io::Write;
use std::process::ExitCode;

use ocr_adapter::core::EXIT_FAILURE;
use ocr_adapter::prelude::*;
use tracing::{debug, error};

fn main() -> ExitCode {
    init_tracing();
    // Panic reports go through tracing; `run` turns the panic into an envelope.
    std::panic::set_hook(Box::new(|info| error!("{info}")));

    let outcome = match Invocation::from_args(std::env::args_os()) {
        Ok(invocation) => {
            let config = EngineConfig::japanese(resolve_model_dir());
            debug!(?config, "engine configuration");
            run(&invocation, || OarOcrEngine::new(&config))
        }
        Err(err) => Outcome::failure(&err),
    };

    let (line, exit_code) = match outcome.envelope.to_line() {
        Ok(line) => (line, outcome.exit_code()),
        Err(err) => {
            error!("failed to encode envelope: {err}");
            (
                r#"{"text":"","error":"failed to encode result"}"#.to_string(),
                ExitCode::from(EXIT_FAILURE),
            )
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
        error!("failed to write envelope: {err}");
        return ExitCode::from(EXIT_FAILURE);
    }

    exit_code
}
