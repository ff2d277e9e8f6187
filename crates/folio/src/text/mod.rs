//! Text post-processing helpers.

pub mod escape;

pub use escape::unescape_control_sequences;
