// crates/lf_physics/src/state.rs

//! 分布函数状态管理
//!
//! 本模块提供格子 Boltzmann 求解所需的状态容器，包括：
//! - DistributionField: 九平面分布函数网格（primary / scratch 双缓冲）
//! - ObstacleMask: 只读障碍掩码
//! - CellMoments / MomentBuffer: 每迭代临时宏观矩
//!
//! # 布局设计
//!
//! 采用 SoA (Structure of Arrays) 布局以优化缓存性能：
//! 每个离散方向一个长度为 `nx*ny` 的连续平面，平面内行主序。
//!
//! ```text
//! f0: [f0_0, f0_1, f0_2, ...]
//! f1: [f1_0, f1_1, f1_2, ...]
//! ...
//! f8: [f8_0, f8_1, f8_2, ...]
//! ```
//!
//! 热循环依赖这一访问模式，不要改为每单元结构体数组。
//!
//! # 不变量
//!
//! 任一单元九个平面之和为该单元局部密度；全网格九平面总和为总质量，
//! 由传播（纯置换）与碰撞（零阶矩守恒）保持到浮点精度。

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::lattice::{self, EAST_SPEEDS, NORTH_SPEEDS, NSPEEDS, SOUTH_SPEEDS, WEST_SPEEDS};

// ============================================================
// 分布函数网格
// ============================================================

/// 九平面分布函数网格（SoA 布局）
///
/// primary 与 scratch 各自独立持有一个实例，角色固定：
/// scratch 始终是传播目标，primary 始终是碰撞目标，二者从不交换。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionField {
    nx: usize,
    ny: usize,
    /// 九个方向平面，各长 `nx*ny`
    planes: [Vec<f64>; NSPEEDS],
}

impl DistributionField {
    /// 创建零初始化网格
    pub fn zeros(nx: usize, ny: usize) -> Self {
        let n = nx * ny;
        Self {
            nx,
            ny,
            planes: std::array::from_fn(|_| vec![0.0; n]),
        }
    }

    /// 创建静止平衡态网格：每个单元处于密度 `density`、速度为零的平衡分布
    pub fn rest_equilibrium(nx: usize, ny: usize, density: f64) -> Self {
        let n = nx * ny;
        Self {
            nx,
            ny,
            planes: std::array::from_fn(|k| vec![lattice::WEIGHTS[k] * density; n]),
        }
    }

    /// x 方向单元数
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向单元数
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// 行列坐标转线性索引
    #[inline]
    pub fn idx(&self, ii: usize, jj: usize) -> usize {
        ii * self.nx + jj
    }

    // ========== 平面访问 ==========

    /// 方向 `k` 的平面切片
    #[inline]
    pub fn plane(&self, k: usize) -> &[f64] {
        &self.planes[k]
    }

    /// 方向 `k` 的可变平面切片
    #[inline]
    pub fn plane_mut(&mut self, k: usize) -> &mut [f64] {
        &mut self.planes[k]
    }

    /// 全部九个平面
    #[inline]
    pub fn planes(&self) -> &[Vec<f64>; NSPEEDS] {
        &self.planes
    }

    /// 全部九个可变平面
    #[inline]
    pub fn planes_mut(&mut self) -> &mut [Vec<f64>; NSPEEDS] {
        &mut self.planes
    }

    // ========== 单点访问 ==========

    /// 读取方向 `k` 在 `(ii, jj)` 的分布值
    #[inline]
    pub fn get(&self, k: usize, ii: usize, jj: usize) -> f64 {
        self.planes[k][ii * self.nx + jj]
    }

    /// 写入方向 `k` 在 `(ii, jj)` 的分布值
    #[inline]
    pub fn set(&mut self, k: usize, ii: usize, jj: usize, value: f64) {
        self.planes[k][ii * self.nx + jj] = value;
    }

    // ========== 宏观矩 ==========

    /// 单元局部密度：九个平面在该单元之和
    #[inline]
    pub fn local_density(&self, idx: usize) -> f64 {
        self.planes.iter().map(|p| p[idx]).sum()
    }

    /// 由分布值直接推导单元矩（密度与速度）
    ///
    /// 退化密度（接近零）的除法不设保护。
    #[inline]
    pub fn moments_at(&self, idx: usize) -> CellMoments {
        let density = self.local_density(idx);
        let sum = |ks: [usize; 3]| ks.iter().map(|&k| self.planes[k][idx]).sum::<f64>();
        let u_x = (sum(EAST_SPEEDS) - sum(WEST_SPEEDS)) / density;
        let u_y = (sum(NORTH_SPEEDS) - sum(SOUTH_SPEEDS)) / density;
        CellMoments { density, u_x, u_y }
    }

    /// 全网格总质量
    pub fn total_density(&self) -> f64 {
        self.planes.iter().map(|p| p.iter().sum::<f64>()).sum()
    }
}

// ============================================================
// 障碍掩码
// ============================================================

/// 障碍掩码：初始化时设置一次，此后只读
///
/// 障碍单元走反弹边界而非 BGK 松弛，且被排除在入流加速与
/// 平均速度统计之外。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleMask {
    nx: usize,
    ny: usize,
    blocked: Vec<bool>,
}

impl ObstacleMask {
    /// 创建全流体掩码
    pub fn open(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            blocked: vec![false; nx * ny],
        }
    }

    /// 标记 `(x, y)` 为障碍单元（`x` 为列，`y` 为行）
    ///
    /// 坐标越界检查属于加载层，调用方保证 `x < nx`、`y < ny`。
    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.nx && y < self.ny);
        self.blocked[y * self.nx + x] = true;
    }

    /// 线性索引处是否为障碍
    #[inline]
    pub fn blocked_at(&self, idx: usize) -> bool {
        self.blocked[idx]
    }

    /// `(ii, jj)` 处是否为障碍
    #[inline]
    pub fn is_blocked(&self, ii: usize, jj: usize) -> bool {
        self.blocked[ii * self.nx + jj]
    }

    /// x 方向单元数
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向单元数
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.blocked.len()
    }

    /// 非障碍单元数
    ///
    /// 求解器在构造时调用一次并缓存为平均速度的分母，运行期间不再重算。
    pub fn unobstructed_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// 掩码切片
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.blocked
    }
}

// ============================================================
// 单元矩
// ============================================================

/// 单元宏观矩（每迭代临时量）
///
/// 传播阶段从 scratch 推导，同迭代内被碰撞阶段立即消费，
/// 从不跨迭代保留。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellMoments {
    /// 局部密度
    pub density: f64,
    /// x 方向速度
    pub u_x: f64,
    /// y 方向速度
    pub u_y: f64,
}

impl CellMoments {
    /// 速度向量
    #[inline]
    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.u_x, self.u_y)
    }

    /// 速度模长
    #[inline]
    pub fn speed(&self) -> f64 {
        (self.u_x * self.u_x + self.u_y * self.u_y).sqrt()
    }
}

/// 单元矩缓冲区，构造一次后整个运行期间复用
#[derive(Debug, Clone)]
pub struct MomentBuffer {
    cells: Vec<CellMoments>,
}

impl MomentBuffer {
    /// 创建零初始化缓冲区
    pub fn new(n_cells: usize) -> Self {
        Self {
            cells: vec![CellMoments::default(); n_cells],
        }
    }

    /// 单元数量
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// 读取单元矩
    #[inline]
    pub fn get(&self, idx: usize) -> CellMoments {
        self.cells[idx]
    }

    /// 全部单元矩
    #[inline]
    pub fn as_slice(&self) -> &[CellMoments] {
        &self.cells
    }

    /// 全部可变单元矩
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [CellMoments] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_equilibrium_init() {
        let field = DistributionField::rest_equilibrium(4, 3, 0.1);
        assert_eq!(field.n_cells(), 12);
        // 中心分量 4ρ/9，轴向 ρ/9，对角 ρ/36
        assert_eq!(field.get(0, 0, 0), lattice::WEIGHTS[0] * 0.1);
        assert_eq!(field.get(1, 2, 3), lattice::WEIGHTS[1] * 0.1);
        assert_eq!(field.get(5, 1, 1), lattice::WEIGHTS[5] * 0.1);
    }

    #[test]
    fn test_local_density_sums_planes() {
        let field = DistributionField::rest_equilibrium(2, 2, 0.1);
        let rho = field.local_density(0);
        assert!((rho - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_total_density() {
        let field = DistributionField::rest_equilibrium(2, 2, 0.1);
        assert!((field.total_density() - 0.1 * 4.0).abs() < 1e-14);
    }

    #[test]
    fn test_moments_at_rest() {
        let field = DistributionField::rest_equilibrium(3, 3, 0.2);
        let m = field.moments_at(4);
        assert!((m.density - 0.2).abs() < 1e-15);
        // 对称分布的速度分量精确相消
        assert_eq!(m.u_x, 0.0);
        assert_eq!(m.u_y, 0.0);
    }

    #[test]
    fn test_obstacle_mask_count() {
        let mut mask = ObstacleMask::open(4, 4);
        assert_eq!(mask.unobstructed_count(), 16);
        mask.set(1, 2);
        mask.set(3, 0);
        assert_eq!(mask.unobstructed_count(), 14);
        assert!(mask.is_blocked(2, 1));
        assert!(mask.blocked_at(3));
    }

    #[test]
    fn test_moment_buffer() {
        let mut buf = MomentBuffer::new(4);
        buf.as_mut_slice()[2] = CellMoments {
            density: 1.0,
            u_x: 3.0,
            u_y: 4.0,
        };
        assert_eq!(buf.get(2).speed(), 5.0);
        assert_eq!(buf.get(2).velocity(), DVec2::new(3.0, 4.0));
    }
}
