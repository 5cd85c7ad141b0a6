//! Types and traits for recording what happens in episodes.
//!
//! * [`Record`] - A container of key-value pairs of various data types
//! * [`RecordValue`] - The types of values that can be stored
//! * [`Recorder`] - Writes records to some destination
//! * [`BufferedRecorder`] - Keeps records in memory
//! * [`NullRecorder`] - Discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use balance_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(1.0));
//! record.insert("obs", RecordValue::Array1(vec![0.0, 0.1, -0.02, 0.0]));
//! assert_eq!(record.get_scalar("step").unwrap(), 1.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
