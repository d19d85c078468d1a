//! Output formats for parse results
//!
//! Every format consumes a [`NodeSnapshot`](crate::snapshot::NodeSnapshot):
//! - treeviz: one line per node with tree connectors and icons
//! - json / yaml: the snapshot tree serialized with serde
//! - value: just the root label, which for domain values is their display form

pub mod registry;
pub mod serialized;
pub mod treeviz;
pub mod value;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use value::ValueFormatter;
