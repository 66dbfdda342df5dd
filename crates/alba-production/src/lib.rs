//! # Alba Production
//!
//! 生產組合最佳化（整數線性規劃）

pub mod model;
pub mod optimizer;

// Re-export 主要類型
pub use model::{ProductionModel, MAX_UNITS};
pub use optimizer::ProductionOptimizer;
