use crate::io::error::Error;
use serde::Serialize;
use std::io::Write;

/// Writes `records` as a JSON array indented with two spaces.
///
/// The output carries no trailing newline, so identical records always
/// produce identical bytes.
pub fn write<W: Write, T: Serialize>(mut writer: W, records: &[T]) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| Error::json("write", e))?;
    writer.flush()?;
    Ok(())
}
