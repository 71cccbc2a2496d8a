use std::io;
use std::sync::Once;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use worker::{console_error, console_log};

static INIT: Once = Once::new();

/// Installs the JSON console subscriber once per isolate.
///
/// `filter` is an `EnvFilter` directive such as `info` or `os_exam_bot=debug`;
/// an unparsable directive falls back to `info`.
pub fn init(filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
        // wasm32 has no system clock, so timestamps are left to the Workers log pipeline.
        let _ = tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .without_time()
            .with_env_filter(filter)
            .with_writer(MakeConsoleWriter)
            .try_init();
    });
}

struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(false)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level() <= Level::WARN)
    }
}

/// Buffers one formatted event and hands it to the Workers console on drop.
struct ConsoleWriter {
    buf: Vec<u8>,
    is_error: bool,
}

impl ConsoleWriter {
    fn new(is_error: bool) -> Self {
        Self {
            buf: Vec::new(),
            is_error,
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if self.is_error {
            console_error!("{}", line);
        } else {
            console_log!("{}", line);
        }
    }
}
