//! Typed wrappers for individual commands, grouped by data type

mod hashes;
mod keys;
mod sets;
mod sorted_sets;
mod strings;
