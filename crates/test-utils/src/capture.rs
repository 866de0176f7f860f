use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use specsweep::console::{Console, Palette};

/// Cloneable in-memory writer, so a test can keep a handle on what a
/// `Console` printed.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }

    /// Uncoloured console writing into this buffer.
    pub fn console(&self, quiet: bool) -> Console {
        Console::new(Box::new(self.clone()), Palette::plain(), quiet)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
