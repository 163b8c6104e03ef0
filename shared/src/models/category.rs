//! Category Model

use serde::{Deserialize, Serialize};

/// Product category (read-only here; used to build printer groups)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}
