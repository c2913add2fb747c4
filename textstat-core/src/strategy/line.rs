//! Line-at-a-time reading
//!
//! A line boundary is always a token boundary, so each line is scanned on
//! its own and no carry-over is needed.

use super::{read_block, IngestionStrategy, ScanContext};
use crate::error::Result;
use std::io::{BufRead, BufReader, Read};

/// Reads lines through a `BufReader` of the given capacity
#[derive(Debug, Clone)]
pub struct LineBufferedStrategy {
    buffer_size: usize,
}

impl LineBufferedStrategy {
    /// Create a strategy with a reader buffer of `buffer_size` bytes
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }
}

impl IngestionStrategy for LineBufferedStrategy {
    fn scan(&self, reader: &mut dyn Read, ctx: &mut ScanContext<'_>) -> Result<()> {
        let mut reader = BufReader::with_capacity(self.buffer_size, reader);
        let mut line = Vec::new();

        loop {
            ctx.check_cancelled()?;
            line.clear();
            let read = reader.read_until(b'\n', &mut line)?;
            if read == 0 {
                break;
            }
            ctx.advance(read);
            ctx.accept_line(&line);

            log::trace!(
                "Processed lines: {}, words: {}",
                ctx.line_count(),
                ctx.distinct_words()
            );
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "line-buffered"
    }
}

/// Assembles lines from small raw reads without a buffered reader
#[derive(Debug, Clone)]
pub struct UnbufferedLineStrategy {
    read_size: usize,
}

impl UnbufferedLineStrategy {
    /// Create a strategy issuing raw reads of `read_size` bytes
    pub fn new(read_size: usize) -> Self {
        Self {
            read_size: read_size.max(1),
        }
    }
}

impl IngestionStrategy for UnbufferedLineStrategy {
    fn scan(&self, reader: &mut dyn Read, ctx: &mut ScanContext<'_>) -> Result<()> {
        let mut block = vec![0u8; self.read_size];
        let mut line = Vec::new();

        loop {
            ctx.check_cancelled()?;
            let read = read_block(reader, &mut block)?;
            if read == 0 {
                break;
            }
            ctx.advance(read);

            let mut rest = &block[..read];
            while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
                line.extend_from_slice(&rest[..=pos]);
                ctx.accept_line(&line);
                line.clear();
                rest = &rest[pos + 1..];
            }
            line.extend_from_slice(rest);
        }

        if !line.is_empty() {
            ctx.accept_line(&line);
        }

        log::trace!(
            "Processed lines: {}, words: {}",
            ctx.line_count(),
            ctx.distinct_words()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "unbuffered-line"
    }
}
