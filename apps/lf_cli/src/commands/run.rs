// apps/lf_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 加载参数与障碍文件，执行完整的碰撞-迁移循环，
//! 报告 Reynolds 数与耗时，并写出结果文件。

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use lf_io::{format_e12, load_obstacles, load_params, write_av_vels, write_final_state};
use lf_physics::{LatticeSolver, ParallelStrategy};

/// 最终状态文件名
const FINAL_STATE_FILE: &str = "final_state.dat";
/// 平均速度历史文件名
const AV_VELS_FILE: &str = "av_vels.dat";

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 参数文件路径
    pub paramfile: PathBuf,

    /// 障碍文件路径
    pub obstaclefile: PathBuf,

    /// 输出目录
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// 强制单线程执行
    #[arg(long)]
    pub sequential: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== LatFlow 模拟启动 ===");

    let params = load_params(&args.paramfile)
        .with_context(|| format!("加载参数文件失败: {}", args.paramfile.display()))?;
    info!(
        "网格: {}x{}, 迭代: {}, omega={}",
        params.nx, params.ny, params.max_iters, params.omega
    );

    let obstacles = load_obstacles(&args.obstaclefile, &params)
        .with_context(|| format!("加载障碍文件失败: {}", args.obstaclefile.display()))?;
    info!(
        "障碍单元: {} / {}",
        obstacles.n_cells() - obstacles.unobstructed_count(),
        obstacles.n_cells()
    );

    let strategy = if args.sequential {
        ParallelStrategy::Sequential
    } else {
        ParallelStrategy::Auto
    };

    let mut solver = LatticeSolver::new(params, obstacles)
        .context("构建求解器失败")?
        .with_strategy(strategy);

    // 运行模拟循环
    let start = Instant::now();
    solver.run();
    let elapsed = start.elapsed();

    let reynolds = solver.reynolds_number();
    let stats = solver.stats();

    info!("=== 模拟完成 ===");
    info!("总步数: {}", stats.total_steps);
    info!("平均步耗时: {:.3} ms", stats.avg_step_time().as_secs_f64() * 1000.0);

    println!("==done==");
    println!("Reynolds number:\t\t{}", format_e12(reynolds));
    println!("Elapsed time:\t\t\t{:.6} (s)", elapsed.as_secs_f64());

    // 写出结果
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("创建输出目录失败: {}", args.output.display()))?;

    let state_path = args.output.join(FINAL_STATE_FILE);
    let records = solver.cell_records();
    write_final_state(&state_path, &records)
        .with_context(|| format!("写出最终状态失败: {}", state_path.display()))?;

    let vels_path = args.output.join(AV_VELS_FILE);
    write_av_vels(&vels_path, solver.av_vels())
        .with_context(|| format!("写出平均速度历史失败: {}", vels_path.display()))?;

    Ok(())
}
