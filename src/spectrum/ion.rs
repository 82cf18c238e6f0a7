use std::fmt;

use serde::{Deserialize, Serialize};

/// The two analytes the DBST probe responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ion {
    /// Pb2+, quenches emission.
    Quencher,
    /// H2PO4-, enhances emission.
    Enhancer,
}

impl Ion {
    pub const ALL: [Ion; 2] = [Ion::Quencher, Ion::Enhancer];

    /// Chemical formula shown to the user.
    pub fn formula(self) -> &'static str {
        match self {
            Ion::Quencher => "Pb2+",
            Ion::Enhancer => "H2PO4-",
        }
    }
}

impl fmt::Display for Ion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}
