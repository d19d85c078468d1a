//! Value formatter: prints only the root label
//!
//! For a transformed result the root label is the domain value's display form,
//! so this is the compact way to see what a grammar produced.

use super::registry::{FormatError, Formatter};
use crate::snapshot::NodeSnapshot;

pub struct ValueFormatter;

impl Formatter for ValueFormatter {
    fn name(&self) -> &str {
        "value"
    }

    fn serialize(&self, snapshot: &NodeSnapshot) -> Result<String, FormatError> {
        Ok(format!("{}\n", snapshot.label))
    }

    fn description(&self) -> &str {
        "Root label only"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_root_label() {
        let snapshot =
            NodeSnapshot::new("Abs", "(λx.x)").with_child(NodeSnapshot::new("Var", "x"));
        assert_eq!(ValueFormatter.serialize(&snapshot).unwrap(), "(λx.x)\n");
    }
}
