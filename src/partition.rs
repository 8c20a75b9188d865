use std::fmt;

use crate::{
  block::{Block, Status},
  error::PartitionError,
};

/// Kilobytes permanently reserved for the operating system. Never part of the chain.
pub const OS_RESERVED: usize = 400;

const HEAD: usize = 0;

/// First-fit partition list over a fixed-size pool.
///
/// Blocks are stored in an arena and chained by index. The head always sits at
/// index 0 and blocks are never removed, so a split only appends to the arena and
/// relinks the block it was carved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionList {
  pool_size: usize,
  blocks: Vec<Block>,
}

/// Usage summary of a [`PartitionList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
  pub blocks: usize,
  pub allocated_blocks: usize,
  pub used: usize,
  pub free: usize,
  pub largest_free: usize,
}

impl PartitionList {
  /// Creates a list holding a single free block of `pool_size - OS_RESERVED`.
  pub fn new(pool_size: usize) -> Result<Self, PartitionError> {
    if pool_size <= OS_RESERVED {
      return Err(PartitionError::PoolTooSmall { pool_size });
    }

    Ok(Self {
      pool_size,
      blocks: vec![Block::new(pool_size - OS_RESERVED, None)],
    })
  }

  pub fn pool_size(&self) -> usize {
    self.pool_size
  }

  /// Allocatable space, i.e. the pool minus the OS reservation.
  pub fn capacity(&self) -> usize {
    self.pool_size - OS_RESERVED
  }

  pub fn block_count(&self) -> usize {
    self.blocks.len()
  }

  fn find_free_block(
    &self,
    size: usize,
  ) -> Option<usize> {
    let mut current = Some(HEAD);

    while let Some(index) = current {
      let block = &self.blocks[index];
      if block.is_free() && block.size >= size {
        return Some(index);
      }
      current = block.next;
    }

    None
  }

  fn find_owned_block(
    &self,
    owner: &str,
  ) -> Option<usize> {
    let mut current = Some(HEAD);

    while let Some(index) = current {
      let block = &self.blocks[index];
      if block.owner() == Some(owner) {
        return Some(index);
      }
      current = block.next;
    }

    None
  }

  /// Assigns `size` kilobytes to `owner` using the first free block large enough.
  ///
  /// When the chosen block is larger than the request it is split: the block keeps
  /// exactly `size` and a new free block holding the remainder is linked right after it.
  /// Owners are not required to be unique.
  ///
  /// # Errors
  ///
  /// - [`PartitionError::NoSpace`] if no free block can hold `size`.
  /// - [`PartitionError::InvalidSize`] if `size` is zero.
  /// - [`PartitionError::InvalidOwner`] if `owner` is empty.
  pub fn allocate(
    &mut self,
    owner: impl Into<String>,
    size: usize,
  ) -> Result<(), PartitionError> {
    let owner = owner.into();

    if owner.is_empty() {
      return Err(PartitionError::InvalidOwner);
    }
    if size == 0 {
      return Err(PartitionError::InvalidSize { owner });
    }

    let Some(index) = self.find_free_block(size) else {
      return Err(PartitionError::NoSpace {
        owner,
        requested: size,
      });
    };

    let remainder = self.blocks[index].size - size;
    if remainder > 0 {
      let split = self.blocks.len();
      let next = self.blocks[index].next;
      self.blocks.push(Block::new(remainder, next));

      let block = &mut self.blocks[index];
      block.size = size;
      block.next = Some(split);
    }

    self.blocks[index].owner = Some(owner);

    Ok(())
  }

  /// Frees the first block allocated to `owner`.
  ///
  /// Freed blocks stay in the chain as they are; neighbouring free blocks are not merged.
  pub fn terminate(
    &mut self,
    owner: &str,
  ) -> Result<(), PartitionError> {
    let index = self
      .find_owned_block(owner)
      .ok_or_else(|| PartitionError::NotFound {
        owner: owner.to_string(),
      })?;

    self.blocks[index].owner = None;

    Ok(())
  }

  /// Walks the chain from the head.
  pub fn blocks(&self) -> Blocks<'_> {
    Blocks {
      blocks: &self.blocks,
      current: Some(HEAD),
    }
  }

  /// `(size, status)` of every block in list order.
  pub fn enumerate(&self) -> impl Iterator<Item = (usize, Status<'_>)> + Clone + '_ {
    self.blocks().map(|block| (block.size(), block.status()))
  }

  pub fn stats(&self) -> Stats {
    self.blocks().fold(Stats::default(), |mut stats, block| {
      stats.blocks += 1;
      if block.is_free() {
        stats.free += block.size;
        stats.largest_free = stats.largest_free.max(block.size);
      } else {
        stats.allocated_blocks += 1;
        stats.used += block.size;
      }
      stats
    })
  }
}

impl fmt::Display for PartitionList {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    for (size, status) in self.enumerate() {
      writeln!(f, "Size: {}k, Status: {}", size, status)?;
    }
    Ok(())
  }
}

impl fmt::Display for Stats {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(
      f,
      "Blocks: {}, Used: {}k, Free: {}k, Largest free: {}k",
      self.blocks, self.used, self.free, self.largest_free
    )
  }
}

/// Iterator over the blocks of a [`PartitionList`] in chain order.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
  blocks: &'a [Block],
  current: Option<usize>,
}

impl<'a> Iterator for Blocks<'a> {
  type Item = &'a Block;

  fn next(&mut self) -> Option<Self::Item> {
    let block = self.blocks.get(self.current?)?;
    self.current = block.next;
    Some(block)
  }
}
