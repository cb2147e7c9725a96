//! JSON import/export of examination batches.
//!
//! Input is an array of exam objects keyed by clinical code:
//!
//! ```json
//! [{ "id": "chart-0042", "S1_2": 4, "S3_4": 2, "S5_6": 1, "NF1": 3 }]
//! ```
//!
//! Output is an array of `{ "id", "components", "outcome" }` objects.

use std::io::{Read, Write};
use std::path::Path;

use crate::application::ScoredExam;
use crate::domain::DentalExam;
use crate::Result;

/// Parse a batch of exams from a reader.
///
/// # Errors
/// Returns error if the input is not a JSON array of exams, or any count is
/// negative or not an integer.
pub fn read_exams<R: Read>(reader: R) -> Result<Vec<DentalExam>> {
    let exams: Vec<DentalExam> = serde_json::from_reader(reader)?;
    Ok(exams)
}

/// Parse a batch of exams from a file.
///
/// # Errors
/// Returns error if the file cannot be opened or parsed.
pub fn load_exams(path: &Path) -> Result<Vec<DentalExam>> {
    let file = std::fs::File::open(path)?;
    read_exams(std::io::BufReader::new(file))
}

/// Write scored exams as pretty-printed JSON followed by a newline.
///
/// # Errors
/// Returns error on serialization or I/O failure.
pub fn write_scored<W: Write>(mut writer: W, scored: &[ScoredExam]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, scored)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
