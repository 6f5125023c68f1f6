// crates/lf_physics/src/lib.rs

//! LatFlow 物理核心
//!
//! D2Q9 BGK 格子 Boltzmann 求解器，模拟带障碍通道中的二维
//! 近似不可压缩流动，产出每单元速度/压强场与 Reynolds 数估计。
//!
//! - 格子常数 (lattice)
//! - 模拟参数 (params)
//! - 状态管理 (state) - 九平面双缓冲、障碍掩码、单元矩
//! - 引擎核心 (engine) - 加速/传播/碰撞遍历、诊断、求解器
//!
//! # 并行模型
//!
//! 同步 fork-join：每个遍历是一次独立的 rayon 数据并行扫描，
//! 遍历之间严格有序，迭代之间严格串行。每个 worker 只写自己
//! 负责的单元/行/平面，无需加锁；唯一的并发合并（平均速度求和）
//! 用固定行序的部分和合并，保证结果可复现。

#![warn(clippy::all)]

pub mod engine;
pub mod lattice;
pub mod params;
pub mod state;

// 重导出常用类型
pub use engine::{
    average_velocity, cell_records, reynolds_number, total_density, CellRecord, LatticeSolver,
    ParallelStrategy, SolverStats,
};
pub use params::{AccelWeights, SimulationParams};
pub use state::{CellMoments, DistributionField, MomentBuffer, ObstacleMask};
