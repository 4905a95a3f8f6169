//! Preorder bit serialization of a [`HuffmanTree`].
//!
//! A leaf is written as bit `1` followed by its 8 symbol bits, MSB first. An
//! internal node is written as bit `0` followed by its left subtree and then
//! its right subtree. Since every internal node has exactly two children the
//! encoding ends itself and carries no size field.

use std::io::{Read, Write};

use crate::bit_io::{BitReader, BitWriter};
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Deepest nesting a tree over 256 symbols can have.
const MAX_DEPTH: usize = 255;

pub fn write_tree<W: Write>(tree: &HuffmanTree, writer: &mut BitWriter<W>) -> Result<()> {
    write_node(&tree.root, writer).map_err(HuffmanError::SinkUnavailable)
}

fn write_node<W: Write>(node: &HuffNode, writer: &mut BitWriter<W>) -> std::io::Result<()> {
    match node {
        HuffNode::Leaf { byte, .. } => {
            writer.push_bit(true)?;
            writer.push_byte(*byte)
        }
        HuffNode::Internal { left, right, .. } => {
            writer.push_bit(false)?;
            write_node(left, writer)?;
            write_node(right, writer)
        }
    }
}

/// Rebuilds a tree from its preorder encoding. Leaf weights are not part of
/// the encoding and come back as 0.
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanTree> {
    read_node(reader, 0).map(HuffmanTree::from_root)
}

fn read_node<R: Read>(reader: &mut BitReader<R>, depth: usize) -> Result<HuffNode> {
    let indicator = reader
        .read_bit()
        .map_err(HuffmanError::SourceUnavailable)?
        .ok_or(HuffmanError::CorruptHeader("tree ended before it was complete"))?;

    if indicator {
        let byte = reader
            .read_byte()
            .map_err(HuffmanError::SourceUnavailable)?
            .ok_or(HuffmanError::CorruptHeader("tree ended inside a leaf symbol"))?;
        return Ok(HuffNode::new(byte, 0));
    }

    if depth >= MAX_DEPTH {
        return Err(HuffmanError::CorruptHeader("tree nested deeper than 255 levels"));
    }
    let left = read_node(reader, depth + 1)?;
    let right = read_node(reader, depth + 1)?;
    Ok(HuffNode::Internal {
        weight: 0,
        left: Box::new(left),
        right: Box::new(right),
    })
}

impl HuffmanTree {
    /// Encoded tree, zero padded to a whole number of bytes.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = BitWriter::new(Vec::new());
        write_tree(self, &mut writer)?;
        writer.flush().map_err(HuffmanError::SinkUnavailable)?;
        Ok(writer.into_inner())
    }

    pub fn deserialize(data: &[u8]) -> Result<HuffmanTree> {
        read_tree(&mut BitReader::new(data))
    }
}
