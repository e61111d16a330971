// crates/spanner-fixtures/src/capture.rs
// ============================================================================
// Module: Output Capture
// Description: Shared console handle with scoped in-memory redirection.
// Purpose: Let tests assert on what sample code prints.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! Code under test prints through a [`Console`] instead of the process-global
//! stdout. [`OutputCapture`] swaps the console's writer for an in-memory
//! buffer and puts the original writer back when it is finished or dropped.
//! Invariants:
//! - The original writer is restored on every exit path, including unwinding.
//! - Text written before a failure stays readable after the failure.
//! - Nested captures restore in reverse order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tracing::trace;
use tracing::warn;

// ============================================================================
// SECTION: Console
// ============================================================================

/// Boxed console target.
type BoxedWriter = Box<dyn Write + Send>;

/// Cloneable console handle; clones share one writer.
#[derive(Clone)]
pub struct Console {
    /// Current writer, swapped during captures.
    target: Arc<Mutex<BoxedWriter>>,
}

impl Console {
    /// Creates a console that writes to process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Creates a console that writes to `writer`.
    #[must_use]
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            target: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Writes `line` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying writer's I/O error.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut target = self.lock();
        target.write_all(line.as_bytes())?;
        target.write_all(b"\n")
    }

    /// Locks the current writer, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, BoxedWriter> {
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs `writer` and returns the one it replaced.
    fn replace(&self, writer: BoxedWriter) -> BoxedWriter {
        let mut target = self.lock();
        if let Err(error) = target.flush() {
            warn!(error = %error, "console flush failed before writer swap");
        }
        std::mem::replace(&mut *target, writer)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Write for &Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}

// ============================================================================
// SECTION: Capture
// ============================================================================

/// In-memory buffer installed while a capture is active.
#[derive(Clone, Default)]
struct CaptureBuffer {
    /// Captured bytes.
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Returns the captured bytes as text, replacing invalid UTF-8.
    fn to_string_lossy(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Active redirection of a [`Console`] into memory.
///
/// # Invariants
/// - `original` is `Some` until the console has been restored.
pub struct OutputCapture<'a> {
    /// Console being redirected.
    console: &'a Console,
    /// Writer to restore.
    original: Option<BoxedWriter>,
    /// Buffer receiving redirected output.
    buffer: CaptureBuffer,
}

impl<'a> OutputCapture<'a> {
    /// Redirects `console` into a fresh buffer.
    #[must_use]
    pub fn begin(console: &'a Console) -> Self {
        let buffer = CaptureBuffer::default();
        let original = console.replace(Box::new(buffer.clone()));
        Self {
            console,
            original: Some(original),
            buffer,
        }
    }

    /// Returns the text captured so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer.to_string_lossy()
    }

    /// Restores the console and returns the captured text.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.restore();
        self.contents()
    }

    /// Puts the original writer back; later calls are no-ops.
    fn restore(&mut self) {
        if let Some(original) = self.original.take() {
            drop(self.console.replace(original));
            trace!(captured_bytes = self.contents().len(), "console restored");
        }
    }
}

impl Drop for OutputCapture<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

impl fmt::Debug for OutputCapture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputCapture").field("active", &self.original.is_some()).finish()
    }
}

/// Stores captured text into a slot when dropped.
struct RecordOnDrop<'a, 'c> {
    /// Active capture.
    capture: OutputCapture<'c>,
    /// Destination for the captured text.
    slot: &'a mut Option<String>,
}

impl Drop for RecordOnDrop<'_, '_> {
    fn drop(&mut self) {
        self.capture.restore();
        *self.slot = Some(self.capture.contents());
    }
}

/// Runs `work` with `console` redirected and stores the captured text in `slot`.
///
/// The console is restored and `slot` is filled even if `work` panics, so
/// partial output remains available to the caller.
pub fn capture_into<T, F>(console: &Console, slot: &mut Option<String>, work: F) -> T
where
    F: FnOnce(&Console) -> T,
{
    let _record = RecordOnDrop {
        capture: OutputCapture::begin(console),
        slot,
    };
    work(console)
}
