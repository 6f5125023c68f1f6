// crates/lf_physics/src/engine/collide.rs

//! 碰撞遍历（BGK 松弛 + 反弹边界）
//!
//! 流体单元：由单元矩构造九个平衡分布，按
//! `new_k = scratch_k + ω·(eq_k − scratch_k)` 松弛后写入 primary。
//!
//! 障碍单元：反弹边界。四对相反方向互相镜像
//! （东↔西、北↔南、东北↔西南、西北↔东南），把 scratch 中方向 `k`
//! 的值写入 primary 的相反方向槽位。静止分量不写入，primary 保留
//! 其旧值。
//!
//! primary 的每个平面只依赖 scratch、矩与掩码，平面之间互相独立，
//! 平面内按行切分，每个单元恰好一个 worker 写入。

use rayon::prelude::*;

use crate::lattice::{equilibrium, OPPOSITE, REST};
use crate::state::{DistributionField, MomentBuffer, ObstacleMask};

/// 对全网格执行碰撞，结果写入 `primary`
pub(crate) fn collide(
    scratch: &DistributionField,
    moments: &MomentBuffer,
    mask: &ObstacleMask,
    primary: &mut DistributionField,
    omega: f64,
    parallel: bool,
) {
    let nx = primary.nx();
    debug_assert_eq!(scratch.n_cells(), primary.n_cells());
    debug_assert_eq!(moments.n_cells(), primary.n_cells());

    if parallel {
        primary
            .planes_mut()
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(k, plane)| {
                plane
                    .par_chunks_mut(nx)
                    .enumerate()
                    .for_each(|(ii, row)| collide_row(k, row, ii * nx, scratch, moments, mask, omega));
            });
    } else {
        for (k, plane) in primary.planes_mut().iter_mut().enumerate() {
            for (ii, row) in plane.chunks_mut(nx).enumerate() {
                collide_row(k, row, ii * nx, scratch, moments, mask, omega);
            }
        }
    }
}

/// 更新方向 `k` 平面的一行
#[inline]
fn collide_row(
    k: usize,
    out: &mut [f64],
    base: usize,
    scratch: &DistributionField,
    moments: &MomentBuffer,
    mask: &ObstacleMask,
    omega: f64,
) {
    let s_plane = scratch.plane(k);
    let reflected = scratch.plane(OPPOSITE[k]);
    for (jj, value) in out.iter_mut().enumerate() {
        let idx = base + jj;
        if mask.blocked_at(idx) {
            // 静止分量不参与反弹，保留 primary 旧值
            if k != REST {
                *value = reflected[idx];
            }
        } else {
            let m = moments.get(idx);
            let s = s_plane[idx];
            *value = s + omega * (equilibrium(k, m.density, m.u_x, m.u_y) - s);
        }
    }
}
