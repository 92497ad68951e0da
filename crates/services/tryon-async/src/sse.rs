//! Incremental decoder for the try-on progress stream.
//!
//! The body is UTF-8 text made of frames separated by a blank line (`"\n\n"`). A
//! frame carrying an event is a single `data: <json>` line. Chunks from the network
//! may end anywhere, including inside a multi-byte character, so decoding keeps two
//! pieces of state: undecoded trailing bytes and text that does not yet form a
//! complete frame.

use std::borrow::Cow;

use crate::types::StreamEvent;

/// Separates one frame from the next
pub const FRAME_SEPARATOR: &str = "\n\n";
/// Prefix of a frame that carries a payload
pub const DATA_MARKER: &str = "data: ";

/// Streaming UTF-8 decoder that carries incomplete sequences across chunks.
///
/// Invalid sequences become U+FFFD, matching a non-fatal text decoder.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    // At most 3 bytes: the longest incomplete prefix of a 4-byte sequence.
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Creates a decoder with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `chunk`, appending complete characters to `out`.
    pub fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        let input: Cow<'_, [u8]> = if self.pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let mut rest: &[u8] = &input;
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    return;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    if let Ok(s) = std::str::from_utf8(valid) {
                        out.push_str(s);
                    }
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        None => {
                            self.pending.extend_from_slice(tail);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Flushes the decoder at end of input. A dangling partial sequence becomes U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    /// Number of bytes waiting for the rest of their character
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Turns raw body chunks into [`StreamEvent`]s.
///
/// Events are only produced once their whole frame has arrived. Malformed payloads
/// are logged and skipped without affecting neighbouring frames.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8StreamDecoder,
    buffer: String,
}

impl FrameDecoder {
    /// Creates an empty decoder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every event completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        // The buffer never holds a separator between pushes, so only the new
        // text plus one trailing newline needs scanning.
        let from = self.buffer.len() - usize::from(self.buffer.ends_with('\n'));
        self.utf8.decode_into(chunk, &mut self.buffer);

        let Some(end) = self.buffer[from..]
            .match_indices(FRAME_SEPARATOR)
            .last()
            .map(|(i, _)| from + i)
        else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(end + FRAME_SEPARATOR.len());
        let complete = std::mem::replace(&mut self.buffer, rest);

        complete[..end]
            .split(FRAME_SEPARATOR)
            .filter_map(parse_frame)
            .collect()
    }

    /// Ends decoding. Text that never formed a complete frame is dropped.
    pub fn finish(mut self) {
        self.utf8.finish(&mut self.buffer);
        if !self.buffer.is_empty() {
            tracing::debug!(
                leftover = self.buffer.len(),
                "progress stream ended with an incomplete frame"
            );
        }
    }

    /// Text received but not yet part of a complete frame
    #[must_use]
    pub fn buffered(&self) -> &str {
        &self.buffer
    }
}

fn parse_frame(frame: &str) -> Option<StreamEvent> {
    let payload = frame.strip_prefix(DATA_MARKER)?.trim();
    if payload.is_empty() {
        return None;
    }

    match StreamEvent::from_payload(payload) {
        Ok(Some(event)) => {
            tracing::debug!(?event, "decoded progress frame");
            Some(event)
        }
        Ok(None) => {
            tracing::debug!(payload, "ignoring frame without a known field");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, payload, "JSON parse error in progress frame");
            None
        }
    }
}
