use std::collections::BTreeMap;
use std::fmt;

use crate::hufftree::{HuffNode, HuffmanTree};

/// Bit pattern assigned to one symbol, first bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping read off the leaves of a [`HuffmanTree`].
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Walks the tree, appending 0 for a left step and 1 for a right step.
    ///
    /// A tree that is a single leaf gives its symbol the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match &tree.root {
            HuffNode::Leaf { byte, .. } => {
                codes.insert(*byte, Code(vec![false]));
            }
            root => generate_table(root, &mut codes, &mut Vec::new()),
        }
        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }
}

fn generate_table(node: &HuffNode, code_table: &mut BTreeMap<u8, Code>, path: &mut Vec<bool>) {
    match node {
        HuffNode::Leaf { byte, .. } => {
            code_table.insert(*byte, Code(path.clone()));
        }
        HuffNode::Internal { left, right, .. } => {
            path.push(false);
            generate_table(left, code_table, path);
            path.pop();

            path.push(true);
            generate_table(right, code_table, path);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::from_tree(&HuffmanTree::from_bytes(data).unwrap())
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let table = table_for(&[0x41; 1000]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0x41).unwrap().to_string(), "0");
    }

    #[test]
    fn test_two_symbols() {
        let table = table_for(b"aab");
        assert_eq!(table.get(b'b').unwrap().to_string(), "0");
        assert_eq!(table.get(b'a').unwrap().to_string(), "1");
        assert!(table.get(b'c').is_none());
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let samples: Vec<Vec<u8>> = vec![
            b"abracadabra".to_vec(),
            b"the quick brown fox jumps over the lazy dog\r\n".to_vec(),
            (0..=255u8).collect(),
            (0..4096u32).map(|i| (i * i % 97) as u8).collect(),
        ];

        for data in samples {
            let table = table_for(&data);
            let codes: Vec<(u8, &Code)> = table.iter().collect();
            for (i, (a_sym, a)) in codes.iter().enumerate() {
                assert!(!a.is_empty());
                for (b_sym, b) in &codes[i + 1..] {
                    assert!(
                        !a.is_prefix_of(b) && !b.is_prefix_of(a),
                        "{a_sym} -> {a} and {b_sym} -> {b} overlap"
                    );
                }
            }
        }
    }

    #[test]
    fn test_skewed_distribution_depth() {
        // fibonacci weights force one long chain
        let mut data = Vec::new();
        let (mut x, mut y) = (1usize, 1usize);
        for symbol in 0..20u8 {
            data.extend(std::iter::repeat(symbol).take(x));
            (x, y) = (y, x + y);
        }
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let table = CodeTable::from_tree(&tree);
        let longest = table.iter().map(|(_, c)| c.len()).max().unwrap();
        assert_eq!(longest, tree.depth());
        assert_eq!(longest, 19);
    }
}
