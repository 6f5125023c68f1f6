// crates/lf_physics/src/engine/diagnostics.rs

//! 诊断量
//!
//! - 平均速度：全部非障碍单元速度模长的均值，每迭代记录一次，
//!   结束后再算一次用于 Reynolds 数
//! - 总质量：九平面全网格双重求和，作守恒校验用，不进入常规输出
//! - Reynolds 数：`av_vel · reynolds_dim / ν`，`ν = (1/6)(2/ω − 1)`
//! - 每单元输出记录：列、行、速度分量、速度模长、压强、障碍标志
//!
//! 平均速度归约采用先并行算每行部分和、再按行序串行合并的方式，
//! 合并顺序与线程数无关，保证回归测试可复现。

use glam::DVec2;
use rayon::prelude::*;

use crate::lattice::{self, C_SQ};
use crate::state::{DistributionField, ObstacleMask};

/// 非障碍单元的平均速度模长
///
/// 直接从 `field`（碰撞后的 primary）重新推导每单元密度与速度。
/// 纯函数：同一缓冲区上重复调用结果逐位相同。
pub fn average_velocity(field: &DistributionField, mask: &ObstacleMask) -> f64 {
    let mut row_sums = vec![0.0; field.ny()];
    average_velocity_buffered(field, mask, mask.unobstructed_count(), &mut row_sums, false)
}

/// 平均速度（复用行部分和缓冲区的热路径版本）
///
/// `wet_cells` 为构造时缓存的非障碍单元数，运行中不得重算。
pub fn average_velocity_buffered(
    field: &DistributionField,
    mask: &ObstacleMask,
    wet_cells: usize,
    row_sums: &mut [f64],
    parallel: bool,
) -> f64 {
    let nx = field.nx();
    debug_assert_eq!(row_sums.len(), field.ny());

    let row_sum = |ii: usize| -> f64 {
        let base = ii * nx;
        let mut tot_u = 0.0;
        for jj in 0..nx {
            let idx = base + jj;
            if !mask.blocked_at(idx) {
                tot_u += field.moments_at(idx).speed();
            }
        }
        tot_u
    };

    if parallel {
        row_sums
            .par_iter_mut()
            .enumerate()
            .for_each(|(ii, s)| *s = row_sum(ii));
    } else {
        for (ii, s) in row_sums.iter_mut().enumerate() {
            *s = row_sum(ii);
        }
    }

    // 固定按行序合并部分和
    row_sums.iter().sum::<f64>() / wet_cells as f64
}

/// 全网格总质量（守恒校验）
pub fn total_density(field: &DistributionField) -> f64 {
    field.total_density()
}

/// 由末态平均速度推导 Reynolds 数
pub fn reynolds_number(av_velocity: f64, reynolds_dim: usize, omega: f64) -> f64 {
    av_velocity * reynolds_dim as f64 / lattice::viscosity(omega)
}

// ============================================================
// 每单元输出记录
// ============================================================

/// 每单元输出记录
///
/// 障碍单元速度分量为零，压强取配置流体密度对应的值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRecord {
    /// 列（x 坐标）
    pub x: usize,
    /// 行（y 坐标）
    pub y: usize,
    /// 速度向量
    pub velocity: DVec2,
    /// 速度模长
    pub speed: f64,
    /// 压强 `ρ_local · c_s²`
    pub pressure: f64,
    /// 是否障碍单元
    pub blocked: bool,
}

/// 按行主序生成全网格的输出记录
pub fn cell_records(
    field: &DistributionField,
    mask: &ObstacleMask,
    fluid_density: f64,
) -> Vec<CellRecord> {
    let (nx, ny) = (field.nx(), field.ny());
    let mut records = Vec::with_capacity(nx * ny);
    for ii in 0..ny {
        for jj in 0..nx {
            let idx = ii * nx + jj;
            let record = if mask.blocked_at(idx) {
                CellRecord {
                    x: jj,
                    y: ii,
                    velocity: DVec2::ZERO,
                    speed: 0.0,
                    pressure: fluid_density * C_SQ,
                    blocked: true,
                }
            } else {
                let m = field.moments_at(idx);
                CellRecord {
                    x: jj,
                    y: ii,
                    velocity: m.velocity(),
                    speed: m.speed(),
                    pressure: m.density * C_SQ,
                    blocked: false,
                }
            };
            records.push(record);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_state_zero_average() {
        let field = DistributionField::rest_equilibrium(4, 4, 0.1);
        let mask = ObstacleMask::open(4, 4);
        assert_eq!(average_velocity(&field, &mask), 0.0);
    }

    #[test]
    fn test_average_velocity_idempotent() {
        let mut field = DistributionField::rest_equilibrium(4, 4, 0.1);
        field.set(1, 1, 1, 0.09);
        field.set(2, 3, 2, 0.03);
        let mask = ObstacleMask::open(4, 4);
        let a = average_velocity(&field, &mask);
        let b = average_velocity(&field, &mask);
        assert_eq!(a, b);
        assert!(a > 0.0);
    }

    #[test]
    fn test_blocked_cells_excluded() {
        let mut field = DistributionField::rest_equilibrium(2, 2, 0.1);
        // 扰动一个单元，再把它标记为障碍：平均速度应为 0
        field.set(1, 0, 0, 0.5);
        let mut mask = ObstacleMask::open(2, 2);
        mask.set(0, 0);
        assert_eq!(average_velocity(&field, &mask), 0.0);
    }

    #[test]
    fn test_parallel_reduction_matches_sequential() {
        let mut field = DistributionField::rest_equilibrium(8, 8, 0.1);
        field.set(1, 2, 5, 0.07);
        field.set(4, 7, 0, 0.02);
        let mask = ObstacleMask::open(8, 8);
        let wet = mask.unobstructed_count();
        let mut rows = vec![0.0; 8];
        let seq = average_velocity_buffered(&field, &mask, wet, &mut rows, false);
        let par = average_velocity_buffered(&field, &mask, wet, &mut rows, true);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_reynolds_number() {
        // ω = 1 ⇒ ν = 1/6；Re = av·dim·6
        let re = reynolds_number(0.05, 100, 1.0);
        assert!((re - 0.05 * 100.0 * 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_cell_records_layout() {
        let field = DistributionField::rest_equilibrium(3, 2, 0.1);
        let mut mask = ObstacleMask::open(3, 2);
        mask.set(1, 0);
        let records = cell_records(&field, &mask, 0.1);
        assert_eq!(records.len(), 6);
        // 行主序：记录 1 是 (x=1, y=0)
        assert_eq!((records[1].x, records[1].y), (1, 0));
        assert!(records[1].blocked);
        assert_eq!(records[1].velocity, DVec2::ZERO);
        assert!((records[1].pressure - 0.1 * C_SQ).abs() < 1e-15);
        // 流体单元压强来自局部密度
        assert!(!records[0].blocked);
        assert!((records[0].pressure - 0.1 * C_SQ).abs() < 1e-14);
    }
}
