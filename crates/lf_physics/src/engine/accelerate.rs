// crates/lf_physics/src/engine/accelerate.rs

//! 入流加速遍历
//!
//! 在入流行（顶边向下第二行）向东注入体积力：东向分量增加 `w1`、
//! 两个东向对角分量增加 `w2`，对应的西向分量减少同量，保持行内质量。
//! 若某列被障碍占据，或扣减会使任一西向分量变为非正（负密度保护），
//! 则该列静默跳过。
//!
//! 各列写入互不相交，列方向完全数据并行。

use rayon::prelude::*;

use crate::params::AccelWeights;
use crate::state::{DistributionField, ObstacleMask};

/// 受加速影响的平面及其增量符号：(方向, 使用 w1 还是 w2, 符号)
const UPDATES: [(usize, bool, f64); 6] = [
    (1, true, 1.0),   // 东
    (5, false, 1.0),  // 东北
    (8, false, 1.0),  // 东南
    (3, true, -1.0),  // 西
    (6, false, -1.0), // 西北
    (7, false, -1.0), // 西南
];

/// 对 `field` 的 `row` 行执行入流加速
///
/// `guard` 为长度 `nx` 的复用缓冲区，记录每列是否通过物理合法性检查。
pub(crate) fn accelerate(
    field: &mut DistributionField,
    mask: &ObstacleMask,
    row: usize,
    weights: AccelWeights,
    guard: &mut [bool],
    parallel: bool,
) {
    let nx = field.nx();
    debug_assert_eq!(guard.len(), nx);

    // 第一阶段：只读检查每列。扣减后任一西向分量不为正则整列跳过。
    let check = |jj: usize| -> bool {
        !mask.is_blocked(row, jj)
            && field.get(3, row, jj) - weights.w1 > 0.0
            && field.get(6, row, jj) - weights.w2 > 0.0
            && field.get(7, row, jj) - weights.w2 > 0.0
    };
    if parallel {
        guard
            .par_iter_mut()
            .enumerate()
            .for_each(|(jj, g)| *g = check(jj));
    } else {
        for (jj, g) in guard.iter_mut().enumerate() {
            *g = check(jj);
        }
    }

    // 第二阶段：按平面应用增量。单行更新量级为 O(nx)，逐平面串行扫过。
    let base = row * nx;
    for (k, axis, sign) in UPDATES {
        let delta = sign * if axis { weights.w1 } else { weights.w2 };
        let row_slice = &mut field.plane_mut(k)[base..base + nx];
        for (value, &ok) in row_slice.iter_mut().zip(guard.iter()) {
            if ok {
                *value += delta;
            }
        }
    }
}
