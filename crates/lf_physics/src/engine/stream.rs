// crates/lf_physics/src/engine/stream.rs

//! 传播遍历与宏观矩提取
//!
//! 对每个单元 `(ii, jj)`，按周期边界从 primary 的邻居单元拷贝九个
//! 方向分量到 scratch（方向 `k` 从 `SOURCE_OFFSET[k]` 指向的邻居读取，
//! 静止分量原地拷贝）。随后从填好的 scratch 推导每单元的密度与速度，
//! 存入矩缓冲区供同迭代的碰撞消费。
//!
//! 每个目标单元恰好由一个 worker 写入：九个平面互相独立，平面内
//! 按行切分，无跨单元写冲突。矩提取作为第二个有序遍历执行，此时
//! scratch 已完整，数值与逐单元融合写法一致。

use rayon::prelude::*;

use super::wrap;
use crate::lattice::SOURCE_OFFSET;
use crate::state::{DistributionField, MomentBuffer};

/// 将 primary 的分布值按格子方向传播进 scratch
pub(crate) fn stream(primary: &DistributionField, scratch: &mut DistributionField, parallel: bool) {
    let nx = primary.nx();
    let ny = primary.ny();
    debug_assert_eq!(scratch.n_cells(), primary.n_cells());

    if parallel {
        scratch
            .planes_mut()
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(k, plane)| {
                let (dr, dc) = SOURCE_OFFSET[k];
                let src = primary.plane(k);
                plane
                    .par_chunks_mut(nx)
                    .enumerate()
                    .for_each(|(ii, row)| stream_row(row, src, wrap(ii, dr, ny) * nx, dc, nx));
            });
    } else {
        for (k, plane) in scratch.planes_mut().iter_mut().enumerate() {
            let (dr, dc) = SOURCE_OFFSET[k];
            let src = primary.plane(k);
            for (ii, row) in plane.chunks_mut(nx).enumerate() {
                stream_row(row, src, wrap(ii, dr, ny) * nx, dc, nx);
            }
        }
    }
}

/// 填充一个平面的一行：从来源行按列偏移 `dc` 周期取值
#[inline]
fn stream_row(dst: &mut [f64], src: &[f64], src_base: usize, dc: isize, nx: usize) {
    for (jj, value) in dst.iter_mut().enumerate() {
        *value = src[src_base + wrap(jj, dc, nx)];
    }
}

/// 从 scratch 推导每单元宏观矩
///
/// 局部密度为九个分量之和；x 速度为（东向和 − 西向和）/ 密度，
/// y 速度同理。退化密度的除法不设保护。
pub(crate) fn compute_moments(
    scratch: &DistributionField,
    moments: &mut MomentBuffer,
    parallel: bool,
) {
    debug_assert_eq!(moments.n_cells(), scratch.n_cells());
    let cells = moments.as_mut_slice();
    if parallel {
        cells
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, m)| *m = scratch.moments_at(idx));
    } else {
        for (idx, m) in cells.iter_mut().enumerate() {
            *m = scratch.moments_at(idx);
        }
    }
}
