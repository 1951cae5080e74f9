// src/output/mod.rs

//! Result Formatter and the key/value output sink.

pub mod format;
pub mod sink;

pub use format::{encode_file_list, error_annotation, format, OutputPair, CHANGES_KEY};
pub use sink::{render_outputs, FileOutputSink, OutputSink, WriterOutputSink};
