//! RDP connection file codec
//!
//! Flat text files with one `key:type:value` directive per line. The codec
//! reads the monitor selection back out of a file, merges a new selection
//! into an existing file and generates complete default files.

pub mod defaults;
pub mod directive;
pub mod document;
pub mod store;

pub use directive::{Directive, DirectiveType};
pub use document::{MergeOutcome, MultimonChange, RdpDocument, SelectionDirective};
pub use store::{RdpFileError, read_document, timestamped_file_name, write_document};
