//! Core types shared by the path resolver, writer and registry

mod severity;
mod options;

pub use severity::Severity;
pub use options::{
    WriteMode, FlushMode, ShiftAge, RotationHint,
    OptionsLayer, WriterOptions, DEFAULT_ACCESSOR,
};
