// apps/lf_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示系统信息与默认模拟参数。

use anyhow::Result;
use clap::Args;
use tracing::info;

use lf_physics::lattice;
use lf_physics::SimulationParams;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示系统信息
    #[arg(long)]
    pub system: bool,

    /// 显示默认参数
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== LatFlow 信息 ===");

    if args.system {
        print_system_info();
    }

    if args.defaults {
        print_default_params();
    }

    if !args.system && !args.defaults {
        // 默认显示所有信息
        print_system_info();
        println!();
        print_default_params();
    }

    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("LatFlow CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!("可用并行度: {}", std::thread::available_parallelism().map_or(1, |n| n.get()));

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            println!("CPU 特性: AVX2 可用");
        }
        if is_x86_feature_detected!("fma") {
            println!("CPU 特性: FMA 可用");
        }
    }
}

fn print_default_params() {
    println!("=== 默认参数 ===");

    let params = SimulationParams::default();

    println!("网格: {} x {}", params.nx, params.ny);
    println!("迭代次数: {}", params.max_iters);
    println!("Reynolds 参考尺度: {}", params.reynolds_dim);
    println!("初始密度: {}", params.density);
    println!("加速幅值: {}", params.accel);
    println!("松弛参数 omega: {}", params.omega);
    println!("运动粘度: {:.6}", lattice::viscosity(params.omega));
}
