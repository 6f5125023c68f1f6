// crates/lf_io/src/obstacles.rs

//! 障碍文件加载
//!
//! 障碍文件每行描述一个被阻塞单元：
//!
//! ```text
//! x y blocked
//! ```
//!
//! 坐标必须落在网格内，`blocked` 必须为 1。空行跳过，其余任何偏差
//! 都是致命错误。未出现在文件中的单元视为流体。

use std::path::Path;

use tracing::debug;

use lf_foundation::error::{LfError, LfResult};
use lf_physics::{ObstacleMask, SimulationParams};

/// 从文件加载障碍掩码
///
/// # 错误
///
/// - 文件不存在或读取失败
/// - 行格式错误、坐标越界或 `blocked` 不为 1
pub fn load_obstacles(path: &Path, params: &SimulationParams) -> LfResult<ObstacleMask> {
    if !path.exists() {
        return Err(LfError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LfError::io_with_source(format!("读取障碍文件失败: {}", path.display()), e)
    })?;

    let mask = parse_obstacles_content(&content, params, path)?;
    debug!(
        blocked = mask.n_cells() - mask.unobstructed_count(),
        "障碍文件加载完成: {}",
        path.display()
    );
    Ok(mask)
}

/// 从字符串解析障碍掩码
pub fn parse_obstacles_str(content: &str, params: &SimulationParams) -> LfResult<ObstacleMask> {
    parse_obstacles_content(content, params, Path::new("<string>"))
}

fn parse_obstacles_content(
    content: &str,
    params: &SimulationParams,
    origin: &Path,
) -> LfResult<ObstacleMask> {
    let mut mask = ObstacleMask::open(params.nx, params.ny);

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(LfError::parse(
                origin,
                line_no,
                format!("期望三个值 (x y blocked)，实际{}个", parts.len()),
            ));
        }

        let x = parse_coord(parts[0], "x", origin, line_no)?;
        let y = parse_coord(parts[1], "y", origin, line_no)?;
        let blocked = parse_coord(parts[2], "blocked", origin, line_no)?;

        if x >= params.nx {
            return Err(LfError::parse(
                origin,
                line_no,
                format!("x 坐标越界: {} >= {}", x, params.nx),
            ));
        }
        if y >= params.ny {
            return Err(LfError::parse(
                origin,
                line_no,
                format!("y 坐标越界: {} >= {}", y, params.ny),
            ));
        }
        if blocked != 1 {
            return Err(LfError::parse(
                origin,
                line_no,
                format!("blocked 必须为 1，实际为 {}", blocked),
            ));
        }

        mask.set(x, y);
    }

    Ok(mask)
}

fn parse_coord(raw: &str, name: &str, origin: &Path, line_no: usize) -> LfResult<usize> {
    raw.parse::<usize>()
        .map_err(|_| LfError::parse(origin, line_no, format!("无法解析 {}: '{}'", name, raw)))
}
