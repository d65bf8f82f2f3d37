//! Fixed-capacity block storage for file content
//!
//! A file's bytes are kept as an ordered list of blocks. Every block holds at
//! most `block_size` bytes; only the last one written by an append may be
//! partially filled. The logical size is tracked separately and never inferred
//! from the block count.

use serde::{Deserialize, Serialize};

/// Capacity of a single block in bytes
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// A single chunk of file content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Bytes actually stored (never more than the store's block size)
    data: Vec<u8>,
}

impl Block {
    fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Stored payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes stored in this block
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block carries no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered block sequence plus logical size
///
/// `Clone` duplicates every payload, so a cloned store shares nothing with
/// its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStore {
    block_size: usize,
    blocks: Vec<Block>,
    size: u64,
}

impl BlockStore {
    /// Creates an empty store with the given block capacity
    ///
    /// A zero capacity falls back to [`DEFAULT_BLOCK_SIZE`].
    pub fn new(block_size: usize) -> Self {
        let block_size = if block_size == 0 {
            DEFAULT_BLOCK_SIZE
        } else {
            block_size
        };
        Self {
            block_size,
            blocks: Vec::new(),
            size: 0,
        }
    }

    /// Appends `bytes`, one block per chunk of at most `block_size` bytes
    ///
    /// Returns the number of blocks added.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let before = self.blocks.len();
        for chunk in bytes.chunks(self.block_size) {
            self.blocks.push(Block::new(chunk));
            self.size += chunk.len() as u64;
        }
        self.blocks.len() - before
    }

    /// Drops all blocks and resets the logical size
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.size = 0;
    }

    /// Copies bytes starting at `offset` into `buffer`
    ///
    /// Blocks lying entirely before `offset` are skipped. Copying stops when
    /// `buffer` is full or the blocks run out. Returns the number of bytes copied.
    pub fn read_at(&self, offset: u64, buffer: &mut [u8]) -> usize {
        let mut skip = offset;
        let mut copied = 0;

        for block in &self.blocks {
            if copied >= buffer.len() {
                break;
            }

            let len = block.len() as u64;
            if skip >= len {
                skip -= len;
                continue;
            }

            let start = skip as usize;
            let available = block.len() - start;
            let count = available.min(buffer.len() - copied);
            buffer[copied..copied + count].copy_from_slice(&block.data[start..start + count]);

            copied += count;
            skip = 0;
        }

        copied
    }

    /// Logical size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of blocks held
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Capacity of each block
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Blocks in order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}
