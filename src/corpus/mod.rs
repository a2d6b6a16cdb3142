//! Corpus plumbing: the line reader feeding the prefix tree and the random
//! corpus generator used to produce test inputs.

pub mod generator;
pub mod lines;

pub use generator::{CorpusGenerator, GenerateSummary, GeneratorConfig, GeneratorError};
pub use lines::LineReader;
