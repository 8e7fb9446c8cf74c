//! Data models for roster entries.

pub mod student;

pub use student::StudentRecord;
