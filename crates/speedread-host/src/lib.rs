//! Host adapters for the speed reading engine: file persistence, terminal
//! input and output, and the shared content service.

pub mod input;
pub mod network;
pub mod render;
pub mod storage;
