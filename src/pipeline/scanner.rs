//! File scanner: streams one file's bytes into a word tally and a token count.
//!
//! A word is a maximal run of bytes that are not ASCII whitespace (space, `\t`, `\n`,
//! `\r`, form feed, vertical tab). Words may straddle read chunks; the pending bytes are
//! carried over until a whitespace byte or end of input closes them.

use std::io::{ErrorKind, Read};

use crate::error::FileError;
use crate::pipeline::CancelToken;
use crate::utils::config::ScanConsts;
use crate::{FilePartial, ScanMode};

/// True for the bytes that separate words.
#[inline]
pub fn is_word_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Incremental tokenizer; feed chunks in order, then [`Tokenizer::finish`].
#[derive(Debug, Default)]
pub struct Tokenizer {
    mode: ScanMode,
    pending: Vec<u8>,
    in_word: bool,
    partial: FilePartial,
}

impl Tokenizer {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn feed(&mut self, chunk: &[u8]) {
        let mut pieces = chunk.split(|b| is_word_separator(*b)).peekable();
        while let Some(piece) = pieces.next() {
            if !piece.is_empty() {
                self.in_word = true;
                if self.mode == ScanMode::Words {
                    self.pending.extend_from_slice(piece);
                }
            }
            // Every piece but the last was closed by a separator.
            if pieces.peek().is_some() {
                self.close_word();
            }
        }
    }

    pub fn finish(mut self) -> FilePartial {
        self.close_word();
        self.partial
    }

    fn close_word(&mut self) {
        if !self.in_word {
            return;
        }
        self.in_word = false;
        self.partial.total += 1;
        if self.mode == ScanMode::TotalOnly {
            return;
        }
        match self.partial.tally.get_mut(self.pending.as_slice()) {
            Some(count) => {
                *count += 1;
                self.pending.clear();
            }
            None => {
                self.partial.tally.insert(std::mem::take(&mut self.pending), 1);
            }
        }
    }
}

/// Scan a whole stream. A read error or cancellation fails the file as a unit; no partial
/// tally escapes.
pub fn scan_reader<R: Read>(
    mut reader: R,
    mode: ScanMode,
    cancel: &CancelToken,
) -> Result<FilePartial, FileError> {
    let mut tokenizer = Tokenizer::new(mode);
    let mut buf = vec![0u8; ScanConsts::READ_CHUNK_SIZE];
    let mut bytes = 0u64;
    loop {
        if cancel.is_cancelled() {
            return Err(FileError::Cancelled);
        }
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(FileError::Read { bytes, source }),
        };
        bytes += n as u64;
        tokenizer.feed(&buf[..n]);
    }
    Ok(tokenizer.finish())
}

/// Scan an in-memory buffer (never fails).
pub fn scan_bytes(bytes: &[u8], mode: ScanMode) -> FilePartial {
    let mut tokenizer = Tokenizer::new(mode);
    tokenizer.feed(bytes);
    tokenizer.finish()
}
