use serde::{Deserialize, Serialize};

/// A client company on whose behalf training requests are raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
}
