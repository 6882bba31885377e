//! The bitstream module turns rank codes into bit planes and back.
//!
//! Plane 0 holds bit 0 of every code in block order, plane 1 holds bit 1, and so on. When most
//! codes are small the upper planes are nearly all zeros, which is what the run-length stage
//! feeds on.
//!
pub mod bit_planes;
