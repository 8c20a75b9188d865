//! # rpartition - A First-Fit Partition Simulator
//!
//! This crate simulates **contiguous memory partitioning** with the first-fit
//! strategy over a singly linked chain of blocks. A fixed-size pool is created,
//! part of it is set aside for the operating system, and named processes are
//! placed into free blocks and later released by name.
//!
//! ## Overview
//!
//! ```text
//!   Pool of 2560k:
//!
//!   ┌──────────────┬──────────────────────────────────────────────────────┐
//!   │  OS (400k)   │                  Free (2160k)                        │
//!   └──────────────┴──────────────────────────────────────────────────────┘
//!     never part      head of the chain
//!     of the chain
//!
//!   After allocate("P1", 500) and allocate("P2", 300):
//!
//!   ┌──────────────┬────────────┬─────────┬───────────────────────────────┐
//!   │  OS (400k)   │  P1 (500k) │ P2(300k)│         Free (1360k)          │
//!   └──────────────┴────────────┴─────────┴───────────────────────────────┘
//!
//!   After terminate("P1"):
//!
//!   ┌──────────────┬────────────┬─────────┬───────────────────────────────┐
//!   │  OS (400k)   │ Free (500k)│ P2(300k)│         Free (1360k)          │
//!   └──────────────┴────────────┴─────────┴───────────────────────────────┘
//!
//!   Freed blocks are never merged with their neighbours.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rpartition
//!   ├── block      - Block record and its Status
//!   ├── command    - Interactive command loop (Session) and input parsing
//!   ├── error      - PartitionError
//!   └── partition  - PartitionList: allocate / terminate / enumerate
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rpartition::{PartitionList, Status};
//!
//! let mut list = PartitionList::new(2560).unwrap();
//!
//! list.allocate("P1", 500).unwrap();
//! list.terminate("P1").unwrap();
//!
//! let blocks: Vec<_> = list.enumerate().collect();
//! assert_eq!(blocks, vec![(500, Status::Free), (1660, Status::Free)]);
//! ```
//!
//! ## How It Works
//!
//! Allocation walks the chain from the head and takes the **first** free block
//! that is large enough. A block larger than the request is split in place:
//!
//! ```text
//!   Split on allocate("P3", 200):
//!
//!   before:  ┌───────────────────┐     ┌─────────┐
//!            │ size: 500, free   │ ──▶ │  next   │
//!            └───────────────────┘     └─────────┘
//!
//!   after:   ┌────────────────┐     ┌────────────────┐     ┌─────────┐
//!            │ size: 200, P3  │ ──▶ │ size: 300, free│ ──▶ │  next   │
//!            └────────────────┘     └────────────────┘     └─────────┘
//! ```
//!
//! The sum of all block sizes is always `pool_size - OS_RESERVED`.
//!
//! ## Limitations
//!
//! - **First-fit only**: no best-fit or worst-fit
//! - **No coalescing**: adjacent free blocks stay separate
//! - **No compaction**: fragmentation lasts until the list is dropped
//! - **Single owner of state**: mutation requires `&mut PartitionList`

mod block;
pub mod command;
mod error;
mod partition;

pub use block::{Block, Status};
pub use error::PartitionError;
pub use partition::{Blocks, OS_RESERVED, PartitionList, Stats};
