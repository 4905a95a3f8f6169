use std::io::{self, Read, Write};

/// Packs bits MSB-first into bytes and hands every completed byte to the sink.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    buffer: u8,
    bit_count: u8, // bits already placed in `buffer`
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            buffer: 0,
            bit_count: 0,
            bytes_written: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            // set bit with OR and mask
            self.buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.sink.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bit_count = 0;
            self.bytes_written += 1;
        }
        Ok(())
    }

    pub fn push_bits<I: IntoIterator<Item = bool>>(&mut self, bits: I) -> io::Result<()> {
        for bit in bits {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    /// Writes all 8 bits of `byte`, most significant first.
    pub fn push_byte(&mut self, byte: u8) -> io::Result<()> {
        for bit_pos in (0..8).rev() {
            self.push_bit((byte >> bit_pos) & 1 == 1)?;
        }
        Ok(())
    }

    /// Writes out a partially filled final byte, zero padding its low bits.
    ///
    /// Returns the number of meaningful bits in the last byte written: the
    /// partial count if there was one, otherwise 8.
    pub fn flush(&mut self) -> io::Result<u8> {
        let valid_bits = if self.bit_count > 0 {
            let count = self.bit_count;
            self.sink.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bit_count = 0;
            self.bytes_written += 1;
            count
        } else {
            8
        };
        self.sink.flush()?;
        Ok(valid_bits)
    }

    /// Bytes handed to the sink so far, including a flushed partial byte.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Reads bits MSB-first, pulling a new byte from the source whenever the
/// current one is used up.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    source: R,
    buffer: u8,
    bits_left: u8,
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            buffer: 0,
            bits_left: 0,
            bytes_read: 0,
        }
    }

    /// Next bit, or `None` once the source has no more bytes.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.bits_left == 0 {
            let mut byte = [0u8; 1];
            loop {
                match self.source.read(&mut byte) {
                    Ok(0) => return Ok(None),
                    Ok(_) => break,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
            self.buffer = byte[0];
            self.bits_left = 8;
            self.bytes_read += 1;
        }

        let bit = (self.buffer >> (self.bits_left - 1)) & 1 == 1;
        self.bits_left -= 1;
        Ok(Some(bit))
    }

    /// Next 8 bits as a byte, or `None` if the source ran out partway.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        for _ in 0..8 {
            match self.read_bit()? {
                Some(bit) => byte = (byte << 1) | bit as u8,
                None => return Ok(None),
            }
        }
        Ok(Some(byte))
    }

    /// Drops whatever is left of the current byte so the next read starts
    /// on a byte boundary.
    pub fn align(&mut self) {
        self.bits_left = 0;
    }

    /// Bytes pulled from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
