use log::{debug, warn};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Log file does not exist")]
    FileNotFound(std::path::PathBuf),
    #[error("failed to read line {line}: {source}")]
    Io { line: usize, source: io::Error },
    #[error("failed to open log file: {0}")]
    Open(#[source] io::Error),
}

/// Open a log file for line-by-line reading. Fails with [`AnalyzeError::FileNotFound`] before
/// any reading if the path does not exist.
pub fn open_log(path: impl AsRef<Path>) -> Result<BufReader<File>, AnalyzeError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AnalyzeError::FileNotFound(path.to_owned()));
    }
    debug!("opening {}", path.display());
    let file = File::open(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => AnalyzeError::FileNotFound(path.to_owned()),
        _ => AnalyzeError::Open(error),
    })?;
    Ok(BufReader::new(file))
}

/// Iterator over the lines of a reader, tolerant of invalid UTF-8.
///
/// Lines are split on `\n` with a trailing `\r` removed. Byte sequences that are not valid
/// UTF-8 are dropped and the rest of the line is kept.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), line: 0 }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = Result<String, AnalyzeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        self.line += 1;
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(decode_lossy(&self.buf, self.line)))
            }
            Err(source) => Some(Err(AnalyzeError::Io { line: self.line, source })),
        }
    }
}

fn decode_lossy(bytes: &[u8], line: usize) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    if dropped > 0 {
        warn!("line {}: dropped {} undecodable bytes", line, dropped);
    }
    text
}
