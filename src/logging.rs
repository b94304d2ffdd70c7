//! Logging setup: console output plus an append-mode log file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Hands out clones of one shared log file handle.
struct FileMakeWriter(File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = File;

    #[allow(clippy::expect_used)]
    fn make_writer(&'a self) -> Self::Writer {
        self.0.try_clone().expect("failed to clone log file handle")
    }
}

/// Initializes tracing with a console sink and an append-mode file sink.
///
/// `RUST_LOG` overrides `default_directives` when set. When the log file
/// cannot be opened, logging degrades to console-only with a warning
/// instead of failing the run.
pub fn init(log_file: &Path, default_directives: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    match open_log_file(log_file) {
        Ok(file) => {
            let file_writer = BoxMakeWriter::new(FileMakeWriter(file));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_writer)
                        .with_ansi(false),
                )
                .init();
        }
        Err(error) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            warn!(
                path = %log_file.display(),
                %error,
                "could not open log file; console logging only"
            );
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
