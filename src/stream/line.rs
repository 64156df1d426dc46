//! Incremental line framing over raw response bytes.

/// Splits an arriving byte stream into complete `\n`-terminated lines.
///
/// Bytes are buffered until a newline arrives, so a line split across
/// reads — including one cut through a multi-byte UTF-8 sequence — comes
/// out whole. The trailing incomplete fragment stays buffered for the
/// next call. Complete lines are decoded lossily; a trailing `\r` is
/// trimmed.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: Vec<u8>,
}

impl LineDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, returning every complete line it unlocked.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(idx) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=idx).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Number of buffered bytes not yet forming a complete line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
