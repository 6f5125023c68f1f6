// crates/lf_io/src/lib.rs

//! LatFlow IO 模块
//!
//! 提供模拟输入输出功能。
//!
//! # 模块
//!
//! - [`params`]: 参数文件加载（七字段文本格式）
//! - [`obstacles`]: 障碍文件加载（`x y blocked` 行格式）
//! - [`writers`]: 最终状态与平均速度历史写出
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use std::path::Path;
//! use lf_io::{load_params, load_obstacles, write_final_state, write_av_vels};
//!
//! let params = load_params(Path::new("input.params"))?;
//! let obstacles = load_obstacles(Path::new("obstacles.dat"), &params)?;
//! // ... 运行求解器 ...
//! write_final_state(Path::new("final_state.dat"), &records)?;
//! write_av_vels(Path::new("av_vels.dat"), &av_vels)?;
//! ```

#![warn(clippy::all)]

pub mod obstacles;
pub mod params;
pub mod writers;

// 重导出常用函数
pub use obstacles::{load_obstacles, parse_obstacles_str};
pub use params::{load_params, parse_params_str};
pub use writers::{format_e12, write_av_vels, write_final_state};

/// 类型别名简化
pub type Result<T> = lf_foundation::error::LfResult<T>;
