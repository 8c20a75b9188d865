use std::fmt;

/// Errors reported by [`PartitionList`](crate::PartitionList).
///
/// None of them is fatal: the list is left exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
  /// No free block is large enough for the request.
  NoSpace { owner: String, requested: usize },
  /// No allocated block belongs to the owner.
  NotFound { owner: String },
  /// Zero-sized request.
  InvalidSize { owner: String },
  /// Empty owner identifier.
  InvalidOwner,
  /// The pool does not extend past the OS reservation.
  PoolTooSmall { pool_size: usize },
}

impl fmt::Display for PartitionError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      PartitionError::NoSpace { owner, .. } => write!(f, "Not enough space to assign {}", owner),
      PartitionError::NotFound { owner } => write!(f, "{} not found!", owner),
      PartitionError::InvalidSize { owner } => write!(f, "Cannot assign {} a zero-sized block", owner),
      PartitionError::InvalidOwner => write!(f, "Process id must not be empty"),
      PartitionError::PoolTooSmall { pool_size } => write!(
        f,
        "Pool of {}k does not exceed the {}k reserved for the OS",
        pool_size,
        crate::OS_RESERVED
      ),
    }
  }
}

impl std::error::Error for PartitionError {}
