// crates/lf_io/src/params.rs

//! 参数文件加载
//!
//! 参数文件为纯文本，按顺序给出七个以空白分隔的值：
//!
//! ```text
//! nx ny max_iters reynolds_dim density accel omega
//! ```
//!
//! 值可以分布在任意多行上。前四个为正整数，后三个为浮点数。
//! 加载后立即调用 [`SimulationParams::validate`]，非法组合在此处报错，
//! 而不是留到求解阶段。

use std::path::Path;

use tracing::{debug, warn};

use lf_foundation::error::{LfError, LfResult};
use lf_physics::SimulationParams;

/// 参数文件字段数
const N_FIELDS: usize = 7;

/// 字段名称，按文件内出现顺序
const FIELD_NAMES: [&str; N_FIELDS] = [
    "nx",
    "ny",
    "max_iters",
    "reynolds_dim",
    "density",
    "accel",
    "omega",
];

/// 从文件加载模拟参数
///
/// # 错误
///
/// - 文件不存在或读取失败
/// - 字段不足七个或无法解析
/// - 参数组合未通过验证（如 `omega` 超出 (0, 2)）
pub fn load_params(path: &Path) -> LfResult<SimulationParams> {
    if !path.exists() {
        return Err(LfError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LfError::io_with_source(format!("读取参数文件失败: {}", path.display()), e)
    })?;

    let params = parse_params_content(&content, path)?;
    debug!(
        nx = params.nx,
        ny = params.ny,
        max_iters = params.max_iters,
        "参数文件加载完成: {}",
        path.display()
    );
    Ok(params)
}

/// 从字符串解析模拟参数
pub fn parse_params_str(content: &str) -> LfResult<SimulationParams> {
    parse_params_content(content, Path::new("<string>"))
}

fn parse_params_content(content: &str, origin: &Path) -> LfResult<SimulationParams> {
    // 逐行收集 (行号, 词元)，保留行号用于报错
    let mut tokens: Vec<(usize, &str)> = Vec::with_capacity(N_FIELDS);
    for (line_idx, line) in content.lines().enumerate() {
        for token in line.split_whitespace() {
            tokens.push((line_idx + 1, token));
        }
    }

    if tokens.len() < N_FIELDS {
        let last_line = tokens.last().map(|&(l, _)| l).unwrap_or(1);
        return Err(LfError::parse(
            origin,
            last_line,
            format!("参数文件字段不足: 期望{}, 实际{}", N_FIELDS, tokens.len()),
        ));
    }
    if tokens.len() > N_FIELDS {
        warn!(
            "参数文件 {} 含多余词元，忽略第{}个之后的内容",
            origin.display(),
            N_FIELDS
        );
    }

    let parse_usize = |i: usize| -> LfResult<usize> {
        let (line, raw) = tokens[i];
        raw.parse::<usize>().map_err(|_| {
            LfError::parse(
                origin,
                line,
                format!("无法解析 {}: '{}'", FIELD_NAMES[i], raw),
            )
        })
    };
    let parse_f64 = |i: usize| -> LfResult<f64> {
        let (line, raw) = tokens[i];
        raw.parse::<f64>().map_err(|_| {
            LfError::parse(
                origin,
                line,
                format!("无法解析 {}: '{}'", FIELD_NAMES[i], raw),
            )
        })
    };

    let params = SimulationParams {
        nx: parse_usize(0)?,
        ny: parse_usize(1)?,
        max_iters: parse_usize(2)?,
        reynolds_dim: parse_usize(3)?,
        density: parse_f64(4)?,
        accel: parse_f64(5)?,
        omega: parse_f64(6)?,
    };

    params.validate()?;
    Ok(params)
}
