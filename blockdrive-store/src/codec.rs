use std::io;

use crate::File;

/// Compression level for written map files.
const COMPRESSION_LEVEL: i32 = 19;

/// Writes a map file as zstd-compressed CBOR.
pub fn encode(file: &File, writer: impl io::Write) -> Result<(), CodecError> {
    let mut encoder =
        zstd::Encoder::new(writer, COMPRESSION_LEVEL).map_err(CodecError::Compression)?;
    ciborium::into_writer(file, &mut encoder).map_err(CodecError::Encode)?;
    encoder.finish().map_err(CodecError::Compression)?;
    Ok(())
}

/// Reads a map file written by [`encode`].
pub fn decode(reader: impl io::Read) -> Result<File, CodecError> {
    let decoder = zstd::Decoder::new(reader).map_err(CodecError::Compression)?;
    ciborium::from_reader(decoder).map_err(CodecError::Decode)
}

/// Errors from [`encode`] and [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The zstd stream could not be set up or flushed.
    #[error("compression error: {0}")]
    Compression(#[source] io::Error),
    /// The file could not be serialized.
    #[error("serialization error: {0}")]
    Encode(#[source] ciborium::ser::Error<io::Error>),
    /// The data is not a valid map file.
    #[error("deserialization error: {0}")]
    Decode(#[source] ciborium::de::Error<io::Error>),
}
