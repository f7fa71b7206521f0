//! Infrastructure adapters for services outside the process.
//!
//! Currently only the avatar file storage backends.

pub mod storage;
