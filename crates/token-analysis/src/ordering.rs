//! Mined-order derivation for recorded transactions.
//!
//! Submission order tells an operator what was sent; the network's actual
//! ordering is the composite key (block number, index within block). The
//! in-block index alone is meaningless across blocks.

use alloy::primitives::B256;
use serde::Serialize;

/// Inclusion coordinates of one mined transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MinedTx {
    pub hash: B256,
    pub block_number: u64,
    pub tx_index: u64,
}

/// Sort ascending by (block number, in-block index).
///
/// Block number is the primary key; the index breaks ties within a block.
pub fn sort_by_inclusion(mut txs: Vec<MinedTx>) -> Vec<MinedTx> {
    txs.sort_by_key(|tx| (tx.block_number, tx.tx_index));
    txs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mined(seed: u8, block_number: u64, tx_index: u64) -> MinedTx {
        MinedTx {
            hash: B256::repeat_byte(seed),
            block_number,
            tx_index,
        }
    }

    #[test]
    fn block_number_is_the_primary_key() {
        let sorted = sort_by_inclusion(vec![mined(3, 12, 0), mined(1, 10, 5), mined(2, 11, 2)]);
        let blocks: Vec<u64> = sorted.iter().map(|tx| tx.block_number).collect();
        assert_eq!(blocks, vec![10, 11, 12]);
    }

    #[test]
    fn in_block_index_breaks_ties() {
        // Submitted as (seed 1, index 4) then (seed 2, index 3): the mined
        // order within block 10 must invert the submission order.
        let sorted = sort_by_inclusion(vec![mined(1, 10, 4), mined(2, 10, 3)]);
        assert_eq!(sorted[0].hash, B256::repeat_byte(2));
        assert_eq!(sorted[1].hash, B256::repeat_byte(1));
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sort_by_inclusion(vec![
            mined(1, 12, 1),
            mined(2, 10, 7),
            mined(3, 12, 0),
            mined(4, 10, 2),
        ]);
        let twice = sort_by_inclusion(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(sort_by_inclusion(Vec::new()).is_empty());
    }
}
