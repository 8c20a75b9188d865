use std::fmt;

/// One contiguous region of the pool.
///
/// Blocks live in the arena owned by [`PartitionList`](crate::PartitionList) and are
/// chained through `next`, which holds the arena index of the following block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
  pub(crate) size: usize,
  pub(crate) owner: Option<String>,
  pub(crate) next: Option<usize>,
}

impl Block {
  pub(crate) fn new(
    size: usize,
    next: Option<usize>,
  ) -> Self {
    Self {
      size,
      owner: None,
      next,
    }
  }

  /// Capacity of the block in kilobytes.
  pub fn size(&self) -> usize {
    self.size
  }

  pub fn owner(&self) -> Option<&str> {
    self.owner.as_deref()
  }

  pub fn is_free(&self) -> bool {
    self.owner.is_none()
  }

  pub fn status(&self) -> Status<'_> {
    match self.owner.as_deref() {
      Some(owner) => Status::Allocated(owner),
      None => Status::Free,
    }
  }
}

/// Allocation state of a block as seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<'a> {
  Free,
  Allocated(&'a str),
}

impl fmt::Display for Status<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Status::Free => write!(f, "Free"),
      Status::Allocated(owner) => write!(f, "{} assigned", owner),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_block_is_free() {
    let block = Block::new(128, None);

    assert!(block.is_free());
    assert_eq!(block.owner(), None);
    assert_eq!(block.status(), Status::Free);
  }

  #[test]
  fn test_status_follows_owner() {
    let mut block = Block::new(64, Some(3));
    block.owner = Some("P7".to_string());

    assert!(!block.is_free());
    assert_eq!(block.status(), Status::Allocated("P7"));
    assert_eq!(block.status().to_string(), "P7 assigned");
    assert_eq!(Status::Free.to_string(), "Free");
  }
}
