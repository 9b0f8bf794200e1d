//! Domain logic and core data structures
//!
//! Pure grid-generator logic: the configuration entity, track lists, the
//! size mutator and the code generator. Nothing here performs I/O.

pub mod codegen;
pub mod core;
pub mod grid;
pub mod mutator;
pub mod track;
