use bytes::{Buf, BytesMut};

/// Splits a newline-delimited JSON body into complete lines as chunks arrive.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: BytesMut,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Next complete, non-blank line without its terminator.
    pub fn next_line(&mut self) -> Option<BytesMut> {
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line = self.buffer.split_to(end);
            self.buffer.advance(1);

            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }
            if !line.iter().all(u8::is_ascii_whitespace) {
                return Some(line);
            }
        }
        None
    }

    /// Terminate a trailing line that arrived without a newline.
    pub fn finish(&mut self) {
        if !self.buffer.is_empty() {
            self.buffer.extend_from_slice(b"\n");
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
