//! Fixed-size chunk reading with token and UTF-8 carry-over

use super::{read_block, IngestionStrategy, ScanContext};
use crate::{error::Result, scanner::scan_chunk};
use std::io::Read;

/// Reads fixed-size byte chunks and scans them with token carry-over
#[derive(Debug, Clone)]
pub struct ChunkedBufferStrategy {
    chunk_size: usize,
}

impl ChunkedBufferStrategy {
    /// Create a strategy reading `chunk_size` bytes at a time
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    fn scan_text(ctx: &mut ScanContext<'_>, text: &str, carry: &mut String) {
        ctx.observe_text(text);
        let output = scan_chunk(text, carry);
        ctx.accept_tokens(output.tokens.iter().map(String::as_str));
        *carry = output.carry;
    }
}

impl IngestionStrategy for ChunkedBufferStrategy {
    fn scan(&self, reader: &mut dyn Read, ctx: &mut ScanContext<'_>) -> Result<()> {
        let mut buffer = vec![0u8; self.chunk_size];
        let mut decoder = Utf8Decoder::default();
        let mut carry = String::new();

        loop {
            ctx.check_cancelled()?;
            let read = read_block(reader, &mut buffer)?;
            if read == 0 {
                break;
            }
            ctx.advance(read);

            let text = decoder.decode(&buffer[..read]);
            Self::scan_text(ctx, &text, &mut carry);

            log::debug!(
                "Processed {} bytes, lines: {}, words: {}",
                ctx.bytes_read(),
                ctx.line_count(),
                ctx.distinct_words()
            );
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            Self::scan_text(ctx, &tail, &mut carry);
        }

        // end of stream: the carry-over is a complete token
        ctx.accept_token(&carry);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "chunked-buffer"
    }
}

/// Incremental UTF-8 decoder that holds back sequences split by a chunk edge
///
/// Invalid sequences decode to U+FFFD exactly as a lossy decode of the whole
/// input would.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Decode the next bytes, keeping an incomplete trailing sequence
    pub(crate) fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut out = String::with_capacity(input.len());
        let mut rest: &[u8] = &input;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush whatever is still pending at end of input
    pub(crate) fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }
}
