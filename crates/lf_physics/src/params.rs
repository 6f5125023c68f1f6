// crates/lf_physics/src/params.rs

//! 模拟参数
//!
//! [`SimulationParams`] 对应参数文件的七个字段，加载后不可变。
//! 验证属于初始化层：核心管线假定参数已通过 [`SimulationParams::validate`]。

use serde::{Deserialize, Serialize};

use lf_foundation::error::LfResult;
use lf_foundation::validation::{
    ensure_dimension, ensure_in_range, ensure_non_negative, ensure_positive,
};

/// 模拟参数（加载后不可变）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// x 方向单元数
    #[serde(default = "default_nx")]
    pub nx: usize,
    /// y 方向单元数
    #[serde(default = "default_ny")]
    pub ny: usize,
    /// 迭代次数
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    /// Reynolds 数参考尺度
    #[serde(default = "default_reynolds_dim")]
    pub reynolds_dim: usize,
    /// 初始流体密度（格子单位）
    #[serde(default = "default_density")]
    pub density: f64,
    /// 体积力幅值（入流行密度重分配量）
    #[serde(default = "default_accel")]
    pub accel: f64,
    /// BGK 松弛参数，期望在 (0, 2) 内
    #[serde(default = "default_omega")]
    pub omega: f64,
}

fn default_nx() -> usize {
    128
}
fn default_ny() -> usize {
    128
}
fn default_max_iters() -> usize {
    1000
}
fn default_reynolds_dim() -> usize {
    128
}
fn default_density() -> f64 {
    0.1
}
fn default_accel() -> f64 {
    0.005
}
fn default_omega() -> f64 {
    1.7
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            nx: default_nx(),
            ny: default_ny(),
            max_iters: default_max_iters(),
            reynolds_dim: default_reynolds_dim(),
            density: default_density(),
            accel: default_accel(),
            omega: default_omega(),
        }
    }
}

impl SimulationParams {
    /// 网格单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// 入流行索引（顶边向下第二行）
    #[inline]
    pub fn inlet_row(&self) -> usize {
        self.ny - 2
    }

    /// 加速权重，构造一次后在整个运行期间复用
    #[inline]
    pub fn accel_weights(&self) -> AccelWeights {
        AccelWeights {
            w1: self.density * self.accel / 9.0,
            w2: self.density * self.accel / 36.0,
        }
    }

    /// 校验参数物理合法性
    ///
    /// 网格维度为正且 `ny >= 2`（入流行必须存在），迭代数为正，
    /// 密度为正，体积力非负，ω 在 (0, 2) 开区间内。
    pub fn validate(&self) -> LfResult<()> {
        ensure_dimension("nx", self.nx, 1)?;
        ensure_dimension("ny", self.ny, 2)?;
        ensure_dimension("max_iters", self.max_iters, 1)?;
        ensure_dimension("reynolds_dim", self.reynolds_dim, 1)?;
        ensure_positive("density", self.density)?;
        ensure_non_negative("accel", self.accel)?;
        ensure_in_range("omega", self.omega, 0.0, 2.0)?;
        Ok(())
    }
}

/// 入流加速的预计算权重
///
/// 轴向分量增减 `w1 = ρ·a/9`，对角分量增减 `w2 = ρ·a/36`。
/// 作为求解器的显式字段构造一次，而非全局状态。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelWeights {
    /// 轴向权重
    pub w1: f64,
    /// 对角权重
    pub w2: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn test_omega_open_interval() {
        let mut p = SimulationParams::default();
        p.omega = 2.0;
        assert!(p.validate().is_err());
        p.omega = 0.0;
        assert!(p.validate().is_err());
        p.omega = 1.999;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_ny_requires_inlet_row() {
        let mut p = SimulationParams::default();
        p.ny = 1;
        assert!(p.validate().is_err());
        p.ny = 2;
        assert!(p.validate().is_ok());
        assert_eq!(p.inlet_row(), 0);
    }

    #[test]
    fn test_accel_weights() {
        let p = SimulationParams {
            density: 0.1,
            accel: 0.1,
            ..Default::default()
        };
        let w = p.accel_weights();
        assert!((w.w1 - 0.01 / 9.0).abs() < 1e-15);
        assert!((w.w2 - 0.01 / 36.0).abs() < 1e-15);
    }

    #[test]
    fn test_negative_accel_rejected() {
        let mut p = SimulationParams::default();
        p.accel = -0.1;
        assert!(p.validate().is_err());
    }
}
