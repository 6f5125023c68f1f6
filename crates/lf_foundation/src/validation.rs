// crates/lf_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供参数检查辅助函数，失败时返回携带字段名的 [`LfError`]。
//!
//! # 示例
//!
//! ```
//! use lf_foundation::validation::{ensure_positive, ensure_in_range};
//!
//! assert!(ensure_positive("density", 0.1).is_ok());
//! assert!(ensure_in_range("omega", 1.2, 0.0, 2.0).is_ok());
//! assert!(ensure_in_range("omega", 2.5, 0.0, 2.0).is_err());
//! ```

use crate::error::{LfError, LfResult};

/// 验证值为正（严格大于零）
pub fn ensure_positive(field: &'static str, value: f64) -> LfResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(LfError::out_of_range(field, value, f64::MIN_POSITIVE, f64::MAX))
    }
}

/// 验证值非负
pub fn ensure_non_negative(field: &'static str, value: f64) -> LfResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(LfError::out_of_range(field, value, 0.0, f64::MAX))
    }
}

/// 验证值在开区间 (min, max) 内
pub fn ensure_in_range(field: &'static str, value: f64, min: f64, max: f64) -> LfResult<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(LfError::out_of_range(field, value, min, max))
    }
}

/// 验证整数维度至少为 `min`
pub fn ensure_dimension(field: &'static str, value: usize, min: usize) -> LfResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(LfError::out_of_range(field, value as f64, min as f64, f64::MAX))
    }
}
