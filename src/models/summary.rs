use serde::{Deserialize, Serialize};

/// Status counts over one result sequence.
///
/// `abnormal` is `Low + High`. Always recomputed from the full sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub normal: usize,
    pub near: usize,
    pub abnormal: usize,
    pub total: usize,
}
