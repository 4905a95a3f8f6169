//! The one-byte field at the front of every compressed stream.
//!
//! It holds the number of meaningful bits in the final payload byte (1 to 8).
//! The compressor only knows that number after the payload is written, so it
//! writes a placeholder first and patches it at the end.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::{HuffmanError, Result};

const PADDING_OFFSET: u64 = 0;
const PLACEHOLDER: u8 = 0;

pub fn write_placeholder<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(&[PLACEHOLDER])
}

/// Overwrites the placeholder of the stream that began at `stream_start` and
/// leaves the writer positioned at the end.
pub fn backpatch_padding<W: Write + Seek>(
    writer: &mut W,
    stream_start: u64,
    valid_bits: u8,
) -> io::Result<()> {
    writer.seek(SeekFrom::Start(stream_start + PADDING_OFFSET))?;
    writer.write_all(&[valid_bits])?;
    writer.seek(SeekFrom::End(0))?;
    Ok(())
}

pub fn read_padding<R: Read>(reader: &mut R) -> Result<u8> {
    let mut padding = [0u8; 1];
    if let Err(e) = reader.read_exact(&mut padding) {
        return Err(match e.kind() {
            io::ErrorKind::UnexpectedEof => HuffmanError::CorruptHeader("missing padding byte"),
            _ => HuffmanError::SourceUnavailable(e),
        });
    }

    match padding[0] {
        1..=8 => Ok(padding[0]),
        _ => Err(HuffmanError::CorruptHeader("padding byte outside 1..=8")),
    }
}

/// Number of payload bits to decode from `payload_bytes` whose last byte
/// carries `padding_bits` meaningful bits.
pub fn payload_bit_budget(payload_bytes: u64, padding_bits: u8) -> u64 {
    if payload_bytes == 0 {
        return 0;
    }
    (payload_bytes - 1) * 8 + u64::from(padding_bits)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_backpatch_rewrites_first_byte_only() {
        let mut out = Cursor::new(Vec::new());
        write_placeholder(&mut out).unwrap();
        out.write_all(&[0xAA, 0xBB]).unwrap();

        backpatch_padding(&mut out, 0, 5).unwrap();
        assert_eq!(out.position(), 3);
        assert_eq!(out.into_inner(), vec![5, 0xAA, 0xBB]);
    }

    #[test]
    fn test_backpatch_after_existing_content() {
        let mut out = Cursor::new(vec![0x11, 0x22]);
        out.seek(SeekFrom::End(0)).unwrap();
        write_placeholder(&mut out).unwrap();
        out.write_all(&[0xCC]).unwrap();

        backpatch_padding(&mut out, 2, 8).unwrap();
        assert_eq!(out.into_inner(), vec![0x11, 0x22, 8, 0xCC]);
    }

    #[test]
    fn test_read_padding_range() {
        for valid in 1..=8u8 {
            assert_eq!(read_padding(&mut &[valid][..]).unwrap(), valid);
        }
        assert!(matches!(
            read_padding(&mut &[0u8][..]),
            Err(HuffmanError::CorruptHeader(_))
        ));
        assert!(matches!(
            read_padding(&mut &[9u8][..]),
            Err(HuffmanError::CorruptHeader(_))
        ));
    }

    #[test]
    fn test_read_padding_from_empty_source() {
        let err = read_padding(&mut io::empty()).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptHeader("missing padding byte")));
    }

    #[test]
    fn test_bit_budget() {
        assert_eq!(payload_bit_budget(0, 8), 0);
        assert_eq!(payload_bit_budget(1, 3), 3);
        assert_eq!(payload_bit_budget(4, 8), 32);
        assert_eq!(payload_bit_budget(4, 1), 25);
    }
}
