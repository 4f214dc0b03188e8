//! Data structures produced by the file readers.
//!
//! These types are plain containers: the io layer fills them in, the
//! analysis and render layers consume them. They carry no knowledge of
//! the file formats they came from beyond what the parsers record about
//! declared versus decoded content.

pub mod matrix;
pub mod series;
