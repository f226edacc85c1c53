//! Merkle root computation over transaction/block hash lists.

use crate::hash::hash256;

/// Computes the Merkle root over a list of 32-byte leaf hashes.
///
/// Pairs are combined as `Hash256(left || right)`; an odd trailing leaf is
/// duplicated. An empty list yields the zero hash.
pub struct MerkleTree;

impl MerkleTree {
    pub fn compute_root(leaves: &[[u8; 32]]) -> Option<[u8; 32]> {
        if leaves.is_empty() {
            return Some([0u8; 32]);
        }

        let mut level: Vec<[u8; 32]> = leaves.to_vec();
        while level.len() > 1 {
            if level.len() % 2 == 1 {
                level.push(*level.last().unwrap());
            }
            level = level
                .chunks(2)
                .map(|pair| {
                    let mut buf = Vec::with_capacity(64);
                    buf.extend_from_slice(&pair[0]);
                    buf.extend_from_slice(&pair[1]);
                    hash256(&buf)
                })
                .collect();
        }
        level.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_yields_zero_root() {
        assert_eq!(MerkleTree::compute_root(&[]), Some([0u8; 32]));
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let leaf = hash256(b"tx1");
        assert_eq!(MerkleTree::compute_root(&[leaf]), Some(leaf));
    }

    #[test]
    fn odd_count_duplicates_last_leaf() {
        let a = hash256(b"a");
        let b = hash256(b"b");
        let c = hash256(b"c");
        let with_dup = MerkleTree::compute_root(&[a, b, c, c]);
        let odd = MerkleTree::compute_root(&[a, b, c]);
        assert_eq!(with_dup, odd);
    }
}
