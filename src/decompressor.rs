use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};

use log::{debug, trace, warn};

use crate::bit_io::BitReader;
use crate::error::{HuffmanError, Result};
use crate::header;
use crate::hufftree::{HuffNode, HuffmanTree};
use crate::tree_codec;

/// Summary of one decompression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressStats {
    pub header_bytes: u64,
    pub payload_bytes: u64,
    pub payload_bits: u64,
    /// Meaningful bits in the last payload byte, as read from the header.
    pub padding_bits: u8,
    pub decoded_bytes: u64,
}

/// Decompresses the stream that runs from the current position of `input`
/// to its end.
///
/// The stream length bounds the payload, so the input must be seekable.
pub fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<DecompressStats>
where
    R: Read + Seek,
    W: Write,
{
    decompress_stream(input, output).inspect_err(|e| {
        if e.is_corrupt_stream() {
            warn!("rejected compressed stream: {e}");
        }
    })
}

fn decompress_stream<R, W>(input: &mut R, output: &mut W) -> Result<DecompressStats>
where
    R: Read + Seek,
    W: Write,
{
    let start = input
        .stream_position()
        .map_err(HuffmanError::SourceUnavailable)?;
    let end = input
        .seek(SeekFrom::End(0))
        .map_err(HuffmanError::SourceUnavailable)?;
    input
        .seek(SeekFrom::Start(start))
        .map_err(HuffmanError::SourceUnavailable)?;
    let total_bytes = end.saturating_sub(start);

    let mut reader = BufReader::new(&mut *input);
    let padding_bits = header::read_padding(&mut reader)?;

    let mut bits = BitReader::new(reader);
    let tree = tree_codec::read_tree(&mut bits)?;
    trace!("{tree}");
    bits.align();

    let header_bytes = 1 + bits.bytes_read();
    let payload_bytes = total_bytes.saturating_sub(header_bytes);
    if payload_bytes == 0 {
        // a non-empty input always yields at least one payload byte
        return Err(HuffmanError::TruncatedPayload { decoded_bits: 0 });
    }
    let payload_bits = header::payload_bit_budget(payload_bytes, padding_bits);
    debug!(
        "header {header_bytes} bytes, payload {payload_bytes} bytes ({payload_bits} bits)"
    );

    let mut sink = BufWriter::new(output);
    let decoded_bytes = decode_payload(&tree, &mut bits, payload_bits, &mut sink)?;
    sink.flush().map_err(HuffmanError::SinkUnavailable)?;

    debug!("decoded {decoded_bytes} bytes");
    Ok(DecompressStats {
        header_bytes,
        payload_bytes,
        payload_bits,
        padding_bits,
        decoded_bytes,
    })
}

/// Walks the tree for exactly `budget` bits, emitting a symbol at every leaf.
fn decode_payload<R: Read, W: Write>(
    tree: &HuffmanTree,
    bits: &mut BitReader<R>,
    budget: u64,
    sink: &mut W,
) -> Result<u64> {
    let root = &tree.root;
    let mut current = root;
    let mut decoded = 0u64;

    for bit_offset in 0..budget {
        let bit = bits
            .read_bit()
            .map_err(HuffmanError::SourceUnavailable)?
            .ok_or(HuffmanError::TruncatedPayload {
                decoded_bits: bit_offset,
            })?;

        current = match current {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            // a single-leaf tree only ever uses the code 0
            HuffNode::Leaf { .. } if !bit => current,
            HuffNode::Leaf { .. } => return Err(HuffmanError::CorruptPayload { bit_offset }),
        };

        if let HuffNode::Leaf { byte, .. } = current {
            sink.write_all(&[*byte])
                .map_err(HuffmanError::SinkUnavailable)?;
            decoded += 1;
            current = root;
        }
    }

    if !std::ptr::eq(current, root) {
        return Err(HuffmanError::TruncatedPayload {
            decoded_bits: budget,
        });
    }
    Ok(decoded)
}
