use serde::{Deserialize, Serialize};

use seampack::io::ext_repr::ExtSolution;

use crate::config::FFDConfig;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FFDOutput {
    /// Name of the document the solution belongs to
    pub document: String,
    pub solution: ExtSolution,
    pub config: FFDConfig,
    /// Summary of every problem encountered during the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}
