// crates/lf_foundation/src/lib.rs

//! LatFlow Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`validation`]: 运行时验证工具
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 thiserror
//! 2. **层次化**: 基础层只定义核心错误，求解器相关错误在 lf_physics 中扩展
//! 3. **可追溯**: 错误携带文件/行号/字段等上下文

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod validation;

// 重导出常用类型
pub use error::{LfError, LfResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{LfError, LfResult};
    pub use crate::validation::{ensure_in_range, ensure_positive};
}
