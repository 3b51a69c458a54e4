//! Adapters layer: runtime surfaces around the engine.

pub mod worker;
