use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::compressor::{self, CompressStats};
use crate::decompressor::{self, DecompressStats};
use crate::error::{HuffmanError, Result};

/// Entry points over byte slices, open files and paths.
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Cursor::new(Vec::new());
        compressor::compress(&mut Cursor::new(data), &mut output)?;
        Ok(output.into_inner())
    }

    pub fn decode(compressed: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        decompressor::decompress(&mut Cursor::new(compressed), &mut output)?;
        Ok(output)
    }

    pub fn encode_from_file(mut input: File, mut output: File) -> Result<CompressStats> {
        compressor::compress(&mut input, &mut output)
    }

    pub fn decode_from_file(mut input: File, mut output: File) -> Result<DecompressStats> {
        decompressor::decompress(&mut input, &mut output)
    }

    /// Compresses the file at `input` into a new or truncated file at `output`.
    ///
    /// The input is opened and checked for content before the output is
    /// created, so a missing or empty input leaves any existing `output`
    /// untouched.
    pub fn compress_path(input: &Path, output: &Path) -> Result<CompressStats> {
        let mut input = File::open(input).map_err(HuffmanError::SourceUnavailable)?;
        if is_exhausted(&mut input).map_err(HuffmanError::SourceUnavailable)? {
            return Err(HuffmanError::EmptyInput);
        }
        let output = create_output(output)?;
        Self::encode_from_file(input, output)
    }

    pub fn decompress_path(input: &Path, output: &Path) -> Result<DecompressStats> {
        let input = File::open(input).map_err(HuffmanError::SourceUnavailable)?;
        let output = create_output(output)?;
        Self::decode_from_file(input, output)
    }
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(HuffmanError::SinkUnavailable)
}

/// True if `input` has no bytes left; otherwise rewinds to where it was.
fn is_exhausted<R: Read + Seek>(input: &mut R) -> io::Result<bool> {
    let start = input.stream_position()?;
    let mut byte = [0u8; 1];
    let n = loop {
        match input.read(&mut byte) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    };
    if n == 0 {
        return Ok(true);
    }
    input.seek(SeekFrom::Start(start))?;
    Ok(false)
}
