// crates/lf_physics/src/engine/mod.rs

//! 引擎核心
//!
//! 每个迭代由四个严格有序的网格遍历组成：
//! 入流加速 → 传播 → 碰撞（含反弹边界）→ 平均速度统计。
//! 各遍历内部按行/平面数据并行，遍历之间不允许重叠；
//! 迭代之间严格串行（下一迭代的加速读取上一迭代碰撞后的 primary）。

pub mod accelerate;
pub mod collide;
pub mod diagnostics;
pub mod solver;
pub mod stream;

pub use diagnostics::{average_velocity, cell_records, reynolds_number, total_density, CellRecord};
pub use solver::{LatticeSolver, SolverStats};

/// Auto 策略的最小并行单元数阈值
pub const MIN_PARALLEL_CELLS: usize = 4096;

/// 遍历并行策略
///
/// - `Sequential`: 完全串行执行，适用于小规模网格
/// - `Parallel`: 每个遍历使用 rayon 数据并行
/// - `Auto`: 根据单元数自动选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelStrategy {
    /// 串行执行
    Sequential,
    /// rayon 数据并行
    Parallel,
    /// 自动选择（根据问题规模）
    #[default]
    Auto,
}

impl ParallelStrategy {
    /// 给定单元数时是否并行执行
    #[inline]
    pub fn use_parallel(self, n_cells: usize) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel => true,
            Self::Auto => n_cells >= MIN_PARALLEL_CELLS,
        }
    }
}

/// 周期边界下的邻居坐标：`i + d (mod n)`，`d ∈ {-1, 0, 1}`
#[inline]
pub(crate) fn wrap(i: usize, d: isize, n: usize) -> usize {
    match d {
        1 => {
            if i + 1 == n {
                0
            } else {
                i + 1
            }
        }
        -1 => {
            if i == 0 {
                n - 1
            } else {
                i - 1
            }
        }
        _ => i,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        assert!(!ParallelStrategy::Sequential.use_parallel(1 << 20));
        assert!(ParallelStrategy::Parallel.use_parallel(4));
        assert!(!ParallelStrategy::Auto.use_parallel(MIN_PARALLEL_CELLS - 1));
        assert!(ParallelStrategy::Auto.use_parallel(MIN_PARALLEL_CELLS));
    }

    #[test]
    fn test_wrap_periodic() {
        assert_eq!(wrap(0, -1, 4), 3);
        assert_eq!(wrap(3, 1, 4), 0);
        assert_eq!(wrap(2, 0, 4), 2);
        assert_eq!(wrap(1, 1, 4), 2);
        assert_eq!(wrap(1, -1, 4), 0);
    }
}
