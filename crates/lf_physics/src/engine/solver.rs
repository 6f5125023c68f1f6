// crates/lf_physics/src/engine/solver.rs

//! 格子 Boltzmann 求解器
//!
//! [`LatticeSolver`] 持有全部运行期缓冲区并驱动迭代管线：
//! 入流加速 → 传播（含矩提取）→ 碰撞 → 平均速度统计，
//! 严格按此顺序执行 `max_iters` 次。
//!
//! 所有缓冲区（双缓冲分布网格、矩缓冲、加速检查行、行部分和）
//! 在构造时按 `nx`、`ny` 分配一次，整个运行期间复用，
//! 热路径内不分配内存。缓存量（非障碍单元数、加速权重）是
//! 求解器的显式字段而非全局状态，支持并行运行多个互不相关的模拟。

use std::time::{Duration, Instant};

use tracing::{debug, info};

use lf_foundation::error::{LfError, LfResult};

use super::diagnostics::{self, CellRecord};
use super::{accelerate, collide, stream, ParallelStrategy};
use crate::params::{AccelWeights, SimulationParams};
use crate::state::{DistributionField, MomentBuffer, ObstacleMask};

/// 运行统计
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverStats {
    /// 已执行迭代数
    pub total_steps: usize,
    /// 累计计算时间
    pub total_duration: Duration,
}

impl SolverStats {
    /// 平均每迭代耗时
    pub fn avg_step_time(&self) -> Duration {
        if self.total_steps > 0 {
            self.total_duration / self.total_steps as u32
        } else {
            Duration::ZERO
        }
    }
}

/// D2Q9 BGK 格子 Boltzmann 求解器
pub struct LatticeSolver {
    params: SimulationParams,
    strategy: ParallelStrategy,

    /// 碰撞目标缓冲区（迭代之间的权威状态）
    primary: DistributionField,
    /// 传播目标缓冲区
    scratch: DistributionField,
    /// 每迭代临时宏观矩
    moments: MomentBuffer,
    obstacles: ObstacleMask,

    // 构造时缓存的派生量
    accel_weights: AccelWeights,
    inlet_row: usize,
    wet_cells: usize,

    // 复用缓冲区
    accel_guard: Vec<bool>,
    row_sums: Vec<f64>,

    av_vels: Vec<f64>,
    iteration: usize,
    stats: SolverStats,
}

impl LatticeSolver {
    /// 创建求解器
    ///
    /// 校验参数并检查障碍掩码尺寸；primary 初始化为配置密度的
    /// 静止平衡态，scratch 置零。
    pub fn new(params: SimulationParams, obstacles: ObstacleMask) -> LfResult<Self> {
        params.validate()?;
        if obstacles.nx() != params.nx || obstacles.ny() != params.ny {
            return Err(LfError::SizeMismatch {
                name: "obstacles",
                expected: params.n_cells(),
                actual: obstacles.n_cells(),
            });
        }

        let n_cells = params.n_cells();
        let wet_cells = obstacles.unobstructed_count();
        if wet_cells == 0 {
            return Err(LfError::invalid_input("障碍掩码没有任何流体单元"));
        }

        Ok(Self {
            primary: DistributionField::rest_equilibrium(params.nx, params.ny, params.density),
            scratch: DistributionField::zeros(params.nx, params.ny),
            moments: MomentBuffer::new(n_cells),
            accel_weights: params.accel_weights(),
            inlet_row: params.inlet_row(),
            wet_cells,
            accel_guard: vec![false; params.nx],
            row_sums: vec![0.0; params.ny],
            av_vels: Vec::with_capacity(params.max_iters),
            iteration: 0,
            stats: SolverStats::default(),
            strategy: ParallelStrategy::default(),
            obstacles,
            params,
        })
    }

    /// 设置并行策略
    pub fn with_strategy(mut self, strategy: ParallelStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    // ========================================================
    // 迭代管线
    // ========================================================

    /// 入流加速遍历
    pub fn accelerate(&mut self) {
        let parallel = self.use_parallel();
        accelerate::accelerate(
            &mut self.primary,
            &self.obstacles,
            self.inlet_row,
            self.accel_weights,
            &mut self.accel_guard,
            parallel,
        );
    }

    /// 传播遍历：primary → scratch，并提取每单元宏观矩
    pub fn stream(&mut self) {
        let parallel = self.use_parallel();
        stream::stream(&self.primary, &mut self.scratch, parallel);
        stream::compute_moments(&self.scratch, &mut self.moments, parallel);
    }

    /// 碰撞遍历：scratch + 矩 → primary
    pub fn collide(&mut self) {
        let parallel = self.use_parallel();
        collide::collide(
            &self.scratch,
            &self.moments,
            &self.obstacles,
            &mut self.primary,
            self.params.omega,
            parallel,
        );
    }

    /// 执行一个完整迭代并记录平均速度
    pub fn step(&mut self) {
        let start = Instant::now();

        self.accelerate();
        self.stream();
        self.collide();

        let parallel = self.use_parallel();
        let av = diagnostics::average_velocity_buffered(
            &self.primary,
            &self.obstacles,
            self.wet_cells,
            &mut self.row_sums,
            parallel,
        );
        self.av_vels.push(av);
        self.iteration += 1;

        self.stats.total_steps += 1;
        self.stats.total_duration += start.elapsed();

        debug!(iteration = self.iteration, av_velocity = av, "迭代完成");
    }

    /// 运行至 `max_iters`
    pub fn run(&mut self) {
        let remaining = self.params.max_iters.saturating_sub(self.iteration);
        info!(
            nx = self.params.nx,
            ny = self.params.ny,
            iterations = remaining,
            wet_cells = self.wet_cells,
            "开始模拟"
        );
        for _ in 0..remaining {
            self.step();
        }
        info!(
            total_steps = self.stats.total_steps,
            avg_step_ms = self.stats.avg_step_time().as_secs_f64() * 1000.0,
            "模拟完成"
        );
    }

    // ========================================================
    // 诊断
    // ========================================================

    /// 当前 primary 上的平均速度（每迭代记录之外的独立调用）
    pub fn average_velocity(&mut self) -> f64 {
        let parallel = self.use_parallel();
        diagnostics::average_velocity_buffered(
            &self.primary,
            &self.obstacles,
            self.wet_cells,
            &mut self.row_sums,
            parallel,
        )
    }

    /// 末态 Reynolds 数
    pub fn reynolds_number(&mut self) -> f64 {
        let av = self.average_velocity();
        diagnostics::reynolds_number(av, self.params.reynolds_dim, self.params.omega)
    }

    /// 全网格总质量
    pub fn total_density(&self) -> f64 {
        diagnostics::total_density(&self.primary)
    }

    /// 末态每单元输出记录
    pub fn cell_records(&self) -> Vec<CellRecord> {
        diagnostics::cell_records(&self.primary, &self.obstacles, self.params.density)
    }

    // ========================================================
    // 访问器
    // ========================================================

    /// 模拟参数
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// primary 缓冲区
    pub fn primary(&self) -> &DistributionField {
        &self.primary
    }

    /// 可变 primary 缓冲区（测试构造特定初始条件用）
    pub fn primary_mut(&mut self) -> &mut DistributionField {
        &mut self.primary
    }

    /// scratch 缓冲区
    pub fn scratch(&self) -> &DistributionField {
        &self.scratch
    }

    /// 障碍掩码
    pub fn obstacles(&self) -> &ObstacleMask {
        &self.obstacles
    }

    /// 非障碍单元数（构造时缓存）
    pub fn wet_cells(&self) -> usize {
        self.wet_cells
    }

    /// 已执行迭代数
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// 平均速度历史，每迭代一个值
    pub fn av_vels(&self) -> &[f64] {
        &self.av_vels
    }

    /// 运行统计
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    #[inline]
    fn use_parallel(&self) -> bool {
        self.strategy.use_parallel(self.params.n_cells())
    }
}
