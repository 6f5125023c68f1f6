// crates/lf_io/src/writers.rs

//! 结果写出
//!
//! 两个输出文件均为纯文本：
//!
//! - `final_state.dat`: 每单元一行 `x y u_x u_y |u| pressure flag`，
//!   行主序，浮点数为 12 位科学计数法。
//! - `av_vels.dat`: 每迭代一行 `index:\t<平均速度>`。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use lf_foundation::error::{LfError, LfResult};
use lf_physics::CellRecord;

/// 以 12 位小数的科学计数法格式化，指数带符号且至少两位
///
/// 标准库 `{:.12E}` 输出 `1.5E0` 形式的指数，这里补齐为 `1.5E+00`，
/// 与既有后处理脚本所消费的格式一致。
pub fn format_e12(value: f64) -> String {
    let s = format!("{:.12E}", value);
    match s.split_once('E') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}E{sign}{digits:0>2}")
        }
        // 非有限值没有指数部分，原样输出
        None => s,
    }
}

/// 写出最终状态文件
pub fn write_final_state(path: &Path, records: &[CellRecord]) -> LfResult<()> {
    let file = File::create(path).map_err(|e| {
        LfError::io_with_source(format!("创建输出文件失败: {}", path.display()), e)
    })?;
    let mut writer = BufWriter::new(file);

    for r in records {
        writeln!(
            writer,
            "{} {} {} {} {} {} {}",
            r.x,
            r.y,
            format_e12(r.velocity.x),
            format_e12(r.velocity.y),
            format_e12(r.speed),
            format_e12(r.pressure),
            u8::from(r.blocked),
        )
        .map_err(|e| LfError::io_with_source("写入最终状态失败", e))?;
    }

    writer
        .flush()
        .map_err(|e| LfError::io_with_source("写入最终状态失败", e))?;
    info!(cells = records.len(), "最终状态已写出: {}", path.display());
    Ok(())
}

/// 写出平均速度历史文件
pub fn write_av_vels(path: &Path, av_vels: &[f64]) -> LfResult<()> {
    let file = File::create(path).map_err(|e| {
        LfError::io_with_source(format!("创建输出文件失败: {}", path.display()), e)
    })?;
    let mut writer = BufWriter::new(file);

    for (i, av) in av_vels.iter().enumerate() {
        writeln!(writer, "{}:\t{}", i, format_e12(*av))
            .map_err(|e| LfError::io_with_source("写入平均速度历史失败", e))?;
    }

    writer
        .flush()
        .map_err(|e| LfError::io_with_source("写入平均速度历史失败", e))?;
    info!(
        iterations = av_vels.len(),
        "平均速度历史已写出: {}",
        path.display()
    );
    Ok(())
}
