//! The bwt_algorithms module holds the block permutation that runs ahead of the rest of the transform.
//!
//! The Burrows-Wheeler Transform sorts the rotations of a block and keeps the byte in front of
//! each one. Equal contexts end up next to each other, so the output has long stretches of the
//! same few bytes. The encoder only needs the `BlockPermuter` trait; `RotationSort` is the
//! implementation the crate ships with.
//!
pub mod bwt_sort;
