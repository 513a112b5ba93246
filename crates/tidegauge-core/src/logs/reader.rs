use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub struct LogReader;

impl LogReader {
    /// Read a log file into lines.
    ///
    /// Bytes that are not valid UTF-8 are replaced instead of failing the
    /// whole file, since a truncated multi-byte sequence only spoils its own
    /// line.
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        tracing::debug!("Reading log file from: {}", path.display());

        let file = File::open(path)?;
        let lines = Self::from_reader(BufReader::new(file))?;

        tracing::debug!("Read {} lines from {}", lines.len(), path.display());

        Ok(lines)
    }

    /// Split any buffered reader into lines, dropping the line terminators.
    pub fn from_reader<R: Read>(reader: BufReader<R>) -> Result<Vec<String>> {
        let mut lines = Vec::new();

        for chunk in reader.split(b'\n') {
            let mut bytes = chunk?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            lines.push(String::from_utf8_lossy(&bytes).into_owned());
        }

        Ok(lines)
    }
}
