//! `io::Write` targets that follow the rotation

use crate::state::RotationState;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes to whichever file [`RotationState`] currently holds.
///
/// The handle is resolved per call, so backends wired to this writer follow
/// a day-boundary swap automatically; no re-wiring step exists. Files are
/// opened in append mode, so a full-line `write_all` from concurrent callers
/// never tears.
#[derive(Debug, Clone)]
pub struct RotationWriter {
    state: Arc<RotationState>,
}

impl RotationWriter {
    /// Creates a writer over `state`.
    pub fn new(state: Arc<RotationState>) -> Self {
        Self { state }
    }
}

impl Write for RotationWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = self.state.current_file();
        let mut handle = &*file;
        handle.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let file = self.state.current_file();
        let mut handle = &*file;
        handle.flush()
    }
}

/// Duplicates every buffer to the rotation file and to standard output.
///
/// Console echo is a fixed policy with no toggle. The file write decides the
/// operation's result; the echo is best-effort.
#[derive(Debug, Clone)]
pub struct TeeWriter {
    file: RotationWriter,
}

impl TeeWriter {
    /// Creates a tee over `state` and standard output.
    pub fn new(state: Arc<RotationState>) -> Self {
        Self {
            file: RotationWriter::new(state),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        let _ = io::stdout().write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let _ = io::stdout().flush();
        Ok(())
    }
}
