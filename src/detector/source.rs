use super::types::Detection;
use crate::error::SourceError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Pull-based boundary over the capture + inference collaborator pair.
///
/// Each call yields the full detection set for the next frame, `Ok(None)`
/// once the stream ends (graceful termination, not an error). Construction of
/// a concrete source is where `SourceError::Unavailable` surfaces — that is
/// the only fatal failure class in the process.
///
/// Handles held by a source (files, capture devices) are released on drop,
/// which covers every loop exit path including early error returns.
pub trait DetectionSource {
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>, SourceError>;
}

/// Replays pre-computed inference output from a JSONL file: one JSON array of
/// detections per line, one line per frame. Stands in for a live camera +
/// model during development and lets the whole detector run without either.
#[derive(Debug)]
pub struct ReplaySource {
    reader: BufReader<File>,
    line: String,
}

impl ReplaySource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Unavailable {
            source_id: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            reader: BufReader::new(file),
            line: String::new(),
        })
    }
}

impl DetectionSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>, SourceError> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| SourceError::Read(e.to_string()))?;
            if read == 0 {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let detections: Vec<Detection> =
                serde_json::from_str(trimmed).map_err(|e| SourceError::Decode(e.to_string()))?;
            return Ok(Some(detections));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn replays_one_frame_per_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"class_id":1,"confidence":0.9}}]"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[]").unwrap();

        let mut source = ReplaySource::open(file.path()).unwrap();
        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].class_id, 1);

        // Blank line is skipped, not treated as a frame.
        let second = source.next_frame().unwrap().unwrap();
        assert!(second.is_empty());

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = ReplaySource::open(Path::new("/nonexistent/frames.jsonl")).unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[test]
    fn malformed_line_is_a_decode_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let mut source = ReplaySource::open(file.path()).unwrap();
        assert!(matches!(
            source.next_frame(),
            Err(SourceError::Decode(_))
        ));
    }
}
