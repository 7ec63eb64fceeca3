use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Console sink that keeps everything written to it in memory.
#[derive(Clone, Default)]
pub struct ConsoleCapture(Arc<Mutex<Vec<u8>>>);

impl ConsoleCapture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for ConsoleCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for ConsoleCapture {
    type Writer = ConsoleCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
