use thiserror::Error;

/// Structural defect found while validating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("node index {index} is outside the arena of {len} nodes")]
    OutOfBounds { index: u32, len: usize },
    #[error("node {index} is linked from more than one slot")]
    SharedNode { index: u32 },
    #[error("cached height mismatch at node {index}: expected {expected}, got {actual}")]
    HeightMismatch {
        index: u32,
        expected: i32,
        actual: i32,
    },
    #[error("AVL balance violated at node {index}: balance factor {balance_factor}")]
    Unbalanced { index: u32, balance_factor: i32 },
    #[error("in-order keys not strictly increasing at node {index}")]
    OrderViolated { index: u32 },
    #[error("tree reaches {reachable} nodes but the arena holds {len}")]
    SizeMismatch { reachable: usize, len: usize },
}
