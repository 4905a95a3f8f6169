use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

use huffpack::{HuffmanCodec, HuffmanError};
use tempfile::tempdir;

fn roundtrip_through_files(dir: &Path, original: &[u8]) -> Vec<u8> {
    let source = dir.join("input.bin");
    let compressed = dir.join("compressed.huff");
    let restored = dir.join("decompressed.bin");
    fs::write(&source, original).unwrap();

    let stats = HuffmanCodec::compress_path(&source, &compressed).unwrap();
    assert_eq!(stats.original_bytes, original.len() as u64);
    assert_eq!(
        stats.compressed_bytes(),
        fs::metadata(&compressed).unwrap().len()
    );

    let stats = HuffmanCodec::decompress_path(&compressed, &restored).unwrap();
    assert_eq!(stats.decoded_bytes, original.len() as u64);
    fs::read(&restored).unwrap()
}

#[test]
fn test_text_file_with_crlf() {
    let dir = tempdir().unwrap();
    let text = "line one\r\nline two\r\n\r\nlast line without newline".repeat(50);
    assert_eq!(roundtrip_through_files(dir.path(), text.as_bytes()), text.as_bytes());
}

#[test]
fn test_binary_file_all_byte_values() {
    let dir = tempdir().unwrap();
    let data: Vec<u8> = (0..64 * 1024u32)
        .map(|i| (i.wrapping_mul(2654435761) >> 13) as u8)
        .collect();
    assert_eq!(roundtrip_through_files(dir.path(), &data), data);
}

#[test]
fn test_single_byte_file() {
    let dir = tempdir().unwrap();
    assert_eq!(roundtrip_through_files(dir.path(), b"\r"), b"\r");
}

#[test]
fn test_compressing_twice_is_byte_identical() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("input.txt");
    fs::write(&source, "to be or not to be, that is the question".repeat(30)).unwrap();

    let first = dir.path().join("first.huff");
    let second = dir.path().join("second.huff");
    HuffmanCodec::compress_path(&source, &first).unwrap();
    HuffmanCodec::compress_path(&source, &second).unwrap();
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn test_empty_file_is_nothing_to_compress() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("empty.txt");
    fs::write(&source, b"").unwrap();

    let out = dir.path().join("out.huff");
    let err = HuffmanCodec::compress_path(&source, &out).unwrap_err();
    assert!(matches!(err, HuffmanError::EmptyInput));
    assert!(!out.exists());
}

#[test]
fn test_empty_file_keeps_earlier_artifact() {
    let dir = tempdir().unwrap();
    let earlier = dir.path().join("earlier.txt");
    let empty = dir.path().join("empty.txt");
    let out = dir.path().join("compressed.huff");
    fs::write(&earlier, "kept from an earlier run").unwrap();
    fs::write(&empty, b"").unwrap();

    HuffmanCodec::compress_path(&earlier, &out).unwrap();
    let before = fs::read(&out).unwrap();

    let err = HuffmanCodec::compress_path(&empty, &out).unwrap_err();
    assert!(matches!(err, HuffmanError::EmptyInput));
    assert_eq!(fs::read(&out).unwrap(), before);
}

#[test]
fn test_truncated_artifact_fails() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("input.txt");
    let compressed = dir.path().join("compressed.huff");
    let data: Vec<u8> = (0..=255u8).cycle().take(4000).collect();
    fs::write(&source, &data).unwrap();
    let stats = HuffmanCodec::compress_path(&source, &compressed).unwrap();

    // cut into the tree, then drop the whole payload
    let full = fs::read(&compressed).unwrap();
    for keep in [1, stats.header_bytes as usize - 1, stats.header_bytes as usize] {
        let cut = dir.path().join(format!("cut{keep}.huff"));
        fs::write(&cut, &full[..keep]).unwrap();
        let err = HuffmanCodec::decompress_path(&cut, &dir.path().join("out.bin")).unwrap_err();
        assert!(
            matches!(
                err,
                HuffmanError::CorruptHeader(_) | HuffmanError::TruncatedPayload { .. }
            ),
            "keeping {keep} bytes gave {err:?}"
        );
    }
}

#[test]
fn test_dropping_trailing_bytes_never_restores_original() {
    let dir = tempdir().unwrap();
    let samples: Vec<Vec<u8>> = vec![
        b"abracadabra, said the magician
".repeat(40),
        (0..=255u8).cycle().take(3000).collect(),
        vec![0x41; 1000],
        (0..6000u32).map(|i| (i * i % 251) as u8).collect(),
    ];

    for (n, data) in samples.iter().enumerate() {
        let source = dir.path().join(format!("sample{n}.bin"));
        let compressed = dir.path().join(format!("sample{n}.huff"));
        fs::write(&source, data).unwrap();
        let stats = HuffmanCodec::compress_path(&source, &compressed).unwrap();
        let full = fs::read(&compressed).unwrap();

        let max_cut = (stats.payload_bytes as usize).min(8);
        for k in 1..=max_cut {
            let cut = dir.path().join(format!("sample{n}-minus{k}.huff"));
            let restored = dir.path().join(format!("sample{n}-minus{k}.out"));
            fs::write(&cut, &full[..full.len() - k]).unwrap();

            match HuffmanCodec::decompress_path(&cut, &restored) {
                Err(err) => assert!(
                    err.is_corrupt_stream(),
                    "sample {n} minus {k} bytes gave {err:?}"
                ),
                Ok(_) => assert_ne!(
                    &fs::read(&restored).unwrap(),
                    data,
                    "sample {n} minus {k} bytes decoded to the original"
                ),
            }
        }

        // the whole payload gone is always reported
        let cut = dir.path().join(format!("sample{n}-header.huff"));
        fs::write(&cut, &full[..stats.header_bytes as usize]).unwrap();
        let err = HuffmanCodec::decompress_path(&cut, &dir.path().join("unused.out")).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedPayload { decoded_bits: 0 }));
    }
}

#[test]
fn test_cli_roundtrip_and_exit_codes() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("notes.txt");
    let compressed = dir.path().join("notes.huff");
    let restored = dir.path().join("notes.out");
    fs::write(&source, "cli round trip\r\n".repeat(10)).unwrap();

    let bin = env!("CARGO_BIN_EXE_huffpack");
    let status = Command::new(bin)
        .args([OsStr::new("compress"), source.as_os_str(), compressed.as_os_str()])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(bin)
        .args([OsStr::new("decompress"), compressed.as_os_str(), restored.as_os_str()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&source).unwrap(), fs::read(&restored).unwrap());

    let missing = Command::new(bin)
        .args([OsStr::new("compress"), dir.path().join("nope.txt").as_os_str()])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert_eq!(missing.code(), Some(2));

    let empty = dir.path().join("empty.txt");
    fs::write(&empty, b"").unwrap();
    let status = Command::new(bin)
        .args([OsStr::new("compress"), empty.as_os_str()])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(4));
    assert!(!dir.path().join("compressed.huff").exists());

    let garbage = dir.path().join("garbage.huff");
    fs::write(&garbage, [0u8, 1, 2, 3]).unwrap();
    let status = Command::new(bin)
        .args([OsStr::new("decompress"), garbage.as_os_str()])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(5));

    let usage = Command::new(bin).arg("squash").status().unwrap();
    assert_eq!(usage.code(), Some(64));
}
