/// Re-frames an arbitrarily chunked text stream into whole lines.
///
/// Completion tokens arrive with no relation to line boundaries, but the
/// client protocol wants one logical line per event. Fragments append to an
/// internal buffer; every line completed by a newline drains out trimmed,
/// and the trailing partial line stays buffered until more input arrives or
/// [`LineBuffer::finish`] flushes it. Emission is strict FIFO in the order
/// the terminating newlines were observed.
///
/// Line content is opaque here - nothing is parsed or validated, and
/// malformed lines pass through for the consumer to discard.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one fragment, returning every line it completed.
    ///
    /// Lines that are empty after trimming are dropped; emitted lines never
    /// contain a newline.
    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        self.buf.push_str(fragment);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=pos).collect();
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        lines
    }

    /// Flush the buffered remainder, if it holds anything non-blank.
    pub fn finish(self) -> Option<String> {
        let rest = self.buf.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }
}
