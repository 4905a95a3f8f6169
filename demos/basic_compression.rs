//! Round trips a binary payload in memory, prints the code table for a short
//! text, then runs the fixed-name file flow the command-line tool uses.

use std::fs;
use std::path::Path;

use huffpack::config::{DEFAULT_COMPRESSED, DEFAULT_DECOMPRESSED};
use huffpack::{CodeTable, HuffmanCodec, HuffmanError, HuffmanTree};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // every byte value, skewed towards CR/LF and NUL
    let mut payload: Vec<u8> = (0..=255u8).collect();
    payload.extend(b"\r\n".repeat(300));
    payload.extend([0u8; 500]);

    let packed = HuffmanCodec::encode(&payload)?;
    println!(
        "binary payload: {} -> {} bytes, {} valid bits in last byte",
        payload.len(),
        packed.len(),
        packed[0]
    );
    assert_eq!(HuffmanCodec::decode(&packed)?, payload);

    let text = b"abracadabra";
    let tree = HuffmanTree::from_bytes(text)?;
    print!("{tree}");
    for (symbol, code) in CodeTable::from_tree(&tree).iter() {
        println!("  {:?} -> {code}", symbol as char);
    }

    // same names the interactive tool writes to
    let source = Path::new("demo_input.bin");
    fs::write(source, &payload)?;
    let stats = HuffmanCodec::compress_path(source, Path::new(DEFAULT_COMPRESSED))?;
    println!(
        "{DEFAULT_COMPRESSED}: header {} bytes, payload {} bits, savings {:.1}%",
        stats.header_bytes,
        stats.payload_bits,
        stats.savings()
    );
    HuffmanCodec::decompress_path(Path::new(DEFAULT_COMPRESSED), Path::new(DEFAULT_DECOMPRESSED))?;
    assert_eq!(fs::read(DEFAULT_DECOMPRESSED)?, payload);

    // an empty input is refused and the previous artifact stays in place
    let empty = Path::new("demo_empty.bin");
    fs::write(empty, b"")?;
    match HuffmanCodec::compress_path(empty, Path::new(DEFAULT_COMPRESSED)) {
        Err(HuffmanError::EmptyInput) => println!("empty input: nothing to compress"),
        other => return Err(format!("unexpected result for empty input: {other:?}").into()),
    }
    assert_eq!(HuffmanCodec::decode(&fs::read(DEFAULT_COMPRESSED)?)?, payload);

    for path in [source, empty, Path::new(DEFAULT_COMPRESSED), Path::new(DEFAULT_DECOMPRESSED)] {
        fs::remove_file(path)?;
    }
    Ok(())
}
