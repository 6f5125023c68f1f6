// apps/lf_cli/src/commands/validate.rs

//! 输入验证命令
//!
//! 检查参数文件与障碍文件的组合是否可以运行，不执行模拟。

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::{error, info, warn};

use lf_io::{load_obstacles, load_params};
use lf_physics::{ObstacleMask, SimulationParams};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 参数文件路径
    pub paramfile: PathBuf,

    /// 障碍文件路径（可选，缺省只验证参数文件）
    pub obstaclefile: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== LatFlow 输入验证 ===");

    let mut result = ValidationResult::default();

    let params = validate_paramfile(&args.paramfile, &mut result);

    if let Some(obstaclefile) = &args.obstaclefile {
        match &params {
            Some(p) => validate_obstaclefile(obstaclefile, p, &mut result),
            None => result.add_warning("参数文件无效，跳过障碍文件检查".to_string()),
        }
    }

    print_validation_result(&result, args.strict)
}

fn validate_paramfile(path: &PathBuf, result: &mut ValidationResult) -> Option<SimulationParams> {
    println!("\n检查参数文件: {}", path.display());

    let params = match load_params(path) {
        Ok(p) => p,
        Err(e) => {
            result.add_error(e.to_string());
            return None;
        }
    };

    if params.omega > 1.9 {
        result.add_warning(format!("omega = {} 接近稳定上限 2.0", params.omega));
    }
    if params.accel == 0.0 {
        result.add_warning("accel 为 0，流体不会被驱动".to_string());
    }

    println!("  ✓ 参数文件格式有效");
    Some(params)
}

fn validate_obstaclefile(
    path: &PathBuf,
    params: &SimulationParams,
    result: &mut ValidationResult,
) {
    println!("\n检查障碍文件: {}", path.display());

    let mask = match load_obstacles(path, params) {
        Ok(m) => m,
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };

    if mask.unobstructed_count() == 0 {
        result.add_error("全部单元被障碍占据，无可统计的流体单元");
        return;
    }

    // 入流行如果全部被阻塞，体积力不会注入任何动量
    if inlet_row_fully_blocked(&mask, params) {
        result.add_warning(format!(
            "入流行 (y = {}) 全部被障碍占据，加速步无效",
            params.inlet_row()
        ));
    }

    println!("  ✓ 障碍文件格式有效");
}

fn inlet_row_fully_blocked(mask: &ObstacleMask, params: &SimulationParams) -> bool {
    let row = params.inlet_row();
    (0..params.nx).all(|jj| mask.is_blocked(row, jj))
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
