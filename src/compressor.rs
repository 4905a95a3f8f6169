use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};

use log::{debug, trace};

use crate::bit_io::BitWriter;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::header;
use crate::hufftree::HuffmanTree;
use crate::tree_codec;

/// Summary of one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressStats {
    pub original_bytes: u64,
    pub distinct_symbols: usize,
    /// Padding byte plus the byte-aligned tree.
    pub header_bytes: u64,
    pub payload_bytes: u64,
    pub payload_bits: u64,
    /// Meaningful bits in the last payload byte, as stored in the header.
    pub padding_bits: u8,
}

impl CompressStats {
    pub fn compressed_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }

    /// Compressed size over original size.
    pub fn ratio(&self) -> f64 {
        self.compressed_bytes() as f64 / self.original_bytes as f64
    }

    /// Space saved, in percent. Negative when the output grew.
    pub fn savings(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }
}

/// Compresses everything from the current position of `input` to its end
/// into `output`.
///
/// The input is read twice: once to count symbols and once to encode them.
/// The output must be seekable so the padding byte can be patched once the
/// payload length is known.
pub fn compress<R, W>(input: &mut R, output: &mut W) -> Result<CompressStats>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let input_start = input
        .stream_position()
        .map_err(HuffmanError::SourceUnavailable)?;
    let frequencies = FrequencyTable::from_reader(BufReader::new(&mut *input))
        .map_err(HuffmanError::SourceUnavailable)?;
    if frequencies.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }
    debug!(
        "counted {} symbols, {} distinct",
        frequencies.total(),
        frequencies.distinct()
    );

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    trace!("{tree}");
    let codes = CodeTable::from_tree(&tree);
    for (symbol, code) in codes.iter() {
        trace!("code for {symbol:#04x}: {code}");
    }

    let output_start = output
        .stream_position()
        .map_err(HuffmanError::SinkUnavailable)?;
    let mut sink = BufWriter::new(&mut *output);
    header::write_placeholder(&mut sink).map_err(HuffmanError::SinkUnavailable)?;

    // the tree gets its own byte-aligned region ahead of the payload
    let mut tree_writer = BitWriter::new(&mut sink);
    tree_codec::write_tree(&tree, &mut tree_writer)?;
    tree_writer.flush().map_err(HuffmanError::SinkUnavailable)?;
    let header_bytes = 1 + tree_writer.bytes_written();

    input
        .seek(SeekFrom::Start(input_start))
        .map_err(HuffmanError::SourceUnavailable)?;
    let mut payload_writer = BitWriter::new(&mut sink);
    let encoded = encode_payload(BufReader::new(&mut *input), &codes, &mut payload_writer)?;
    if encoded != frequencies.total() {
        return Err(changed_input());
    }

    let padding_bits = payload_writer.flush().map_err(HuffmanError::SinkUnavailable)?;
    let payload_bytes = payload_writer.bytes_written();

    header::backpatch_padding(&mut sink, output_start, padding_bits)
        .map_err(HuffmanError::SinkUnavailable)?;
    sink.flush().map_err(HuffmanError::SinkUnavailable)?;

    let stats = CompressStats {
        original_bytes: frequencies.total(),
        distinct_symbols: frequencies.distinct(),
        header_bytes,
        payload_bytes,
        payload_bits: header::payload_bit_budget(payload_bytes, padding_bits),
        padding_bits,
    };
    debug!(
        "wrote {} header bytes and {} payload bits ({} valid in last byte)",
        stats.header_bytes, stats.payload_bits, stats.padding_bits
    );
    Ok(stats)
}

/// Writes the code of every input symbol, returning how many were encoded.
fn encode_payload<R: Read, W: Write>(
    mut reader: R,
    codes: &CodeTable,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let mut chunk = [0u8; 8192];
    let mut encoded = 0u64;
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HuffmanError::SourceUnavailable(e)),
        };
        for &byte in &chunk[..n] {
            let code = codes.get(byte).ok_or_else(changed_input)?;
            writer
                .push_bits(code.bits())
                .map_err(HuffmanError::SinkUnavailable)?;
        }
        encoded += n as u64;
    }
    Ok(encoded)
}

fn changed_input() -> HuffmanError {
    HuffmanError::SourceUnavailable(io::Error::new(
        io::ErrorKind::InvalidData,
        "input changed between counting and encoding",
    ))
}
