//! Backward line reading over fixed-size blocks.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::Result;

/// Default number of bytes pulled per backward read.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Iterator over the lines of a file, last line first.
///
/// Blocks are read backward from the end of the file and split on newline
/// boundaries, so the whole file is never held in memory. The iterator is
/// finite and single-pass; reading again requires reopening the file.
///
/// Each yielded line has its `\n` terminator (and any preceding `\r`)
/// stripped. An empty file yields nothing; a final line without a
/// terminator is still yielded.
#[derive(Debug)]
pub struct ReverseLineReader {
    file: File,
    /// File offset of the first byte not yet pulled into `buf`.
    pos: u64,
    /// Unemitted bytes, contiguous with the region already emitted.
    buf: Vec<u8>,
    block_size: usize,
    started: bool,
    done: bool,
}

impl ReverseLineReader {
    /// Open `path` for backward line iteration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its length read.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let len = file.seek(SeekFrom::End(0))?;
        Ok(Self {
            file,
            pos: len,
            buf: Vec::new(),
            block_size: DEFAULT_BLOCK_SIZE,
            started: false,
            done: len == 0,
        })
    }

    /// Use `block_size` bytes per backward read instead of the default.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Pull one more block from the front of the unread region into `buf`.
    /// Returns `false` once the start of the file has been reached.
    fn fill(&mut self) -> std::io::Result<bool> {
        if self.pos == 0 {
            return Ok(false);
        }
        let delta = u64::min(self.block_size as u64, self.pos);
        self.pos -= delta;
        self.file.seek(SeekFrom::Start(self.pos))?;

        let mut block = vec![0_u8; delta as usize];
        self.file.read_exact(&mut block)?;
        block.extend_from_slice(&self.buf);
        self.buf = block;
        Ok(true)
    }

    /// Strip the file's final line terminator so it does not read as a
    /// trailing empty line.
    fn strip_trailing_newline(&mut self) {
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
    }
}

fn decode_line(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

impl Iterator for ReverseLineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if !self.started {
                match self.fill() {
                    Ok(true) => {
                        self.started = true;
                        self.strip_trailing_newline();
                    }
                    Ok(false) => {
                        self.done = true;
                        return None;
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e.into()));
                    }
                }
            }

            if let Some(idx) = self.buf.iter().rposition(|&b| b == b'\n') {
                let line = self.buf.split_off(idx + 1);
                self.buf.pop();
                return Some(Ok(decode_line(line)));
            }

            match self.fill() {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    if self.buf.is_empty() {
                        return None;
                    }
                    let line = std::mem::take(&mut self.buf);
                    return Some(Ok(decode_line(line)));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_reversed(content: &str) -> Vec<String> {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lines.txt");
        fs::write(&path, content).unwrap();
        ReverseLineReader::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_lines_come_back_reversed() {
        assert_eq!(read_reversed("a\nb\nc\n"), ["c", "b", "a"]);
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        assert!(read_reversed("").is_empty());
    }

    #[test]
    fn test_missing_final_terminator() {
        assert_eq!(read_reversed("a\nb\nc"), ["c", "b", "a"]);
    }

    #[test]
    fn test_crlf_terminators_are_stripped() {
        assert_eq!(read_reversed("one\r\ntwo\r\n"), ["two", "one"]);
    }

    #[test]
    fn test_lines_spanning_blocks() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("long.txt");
        let lines: Vec<String> = (0..50).map(|i| format!("line-{i:04}-padding-padding")).collect();
        fs::write(&path, lines.join("\n")).unwrap();

        let mut expected = lines.clone();
        expected.reverse();

        let got = ReverseLineReader::open(&path)
            .unwrap()
            .with_block_size(7)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_single_pass_is_finite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("few.txt");
        fs::write(&path, "x\ny\n").unwrap();

        let mut reader = ReverseLineReader::open(&path).unwrap();
        assert_eq!(reader.next().unwrap().unwrap(), "y");
        assert_eq!(reader.next().unwrap().unwrap(), "x");
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }
}
