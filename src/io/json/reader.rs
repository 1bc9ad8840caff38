use crate::io::error::Error;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads a JSON array of records previously written by [`write`](super::write).
pub fn read<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, Error> {
    serde_json::from_reader(reader).map_err(|e| Error::json("read", e))
}
