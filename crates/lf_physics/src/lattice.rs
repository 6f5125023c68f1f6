// crates/lf_physics/src/lattice.rs

//! D2Q9 格子常数
//!
//! 每个单元 9 个离散速度方向，编号如下：
//!
//! ```text
//! 6 2 5
//!  \|/
//! 3-0-1
//!  /|\
//! 7 4 8
//! ```
//!
//! 即 0 为静止分量，1/2/3/4 为东/北/西/南轴向分量，
//! 5/6/7/8 为东北/西北/西南/东南对角分量。
//!
//! 网格采用行主序展开，`ii` 为行（y 方向），`jj` 为列（x 方向），
//! 单元线性索引为 `ii * nx + jj`。

/// 离散速度方向数
pub const NSPEEDS: usize = 9;

/// 静止方向索引
pub const REST: usize = 0;

/// 声速平方 c_s² = 1/3（格子单位）
pub const C_SQ: f64 = 1.0 / 3.0;

/// 各方向格子权重：中心 4/9，轴向 1/9，对角 1/36
pub const WEIGHTS: [f64; NSPEEDS] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// 各方向单位格子向量 (e_x, e_y)
pub const E: [(f64, f64); NSPEEDS] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (0.0, 1.0),
    (-1.0, 0.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
    (1.0, -1.0),
];

/// 反弹边界使用的相反方向映射（东↔西、北↔南、东北↔西南、西北↔东南）
pub const OPPOSITE: [usize; NSPEEDS] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// 传播时各方向分量在 primary 网格中的来源偏移 (d_row, d_col)
///
/// 方向 `k` 携带从来源单元流向本单元的密度，因此来源偏移是
/// 格子向量的反方向，例如东向分量 (k=1) 来自西侧邻居 (0, -1)。
pub const SOURCE_OFFSET: [(isize, isize); NSPEEDS] = [
    (0, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
];

/// 含东向分量的方向
pub const EAST_SPEEDS: [usize; 3] = [1, 5, 8];
/// 含西向分量的方向
pub const WEST_SPEEDS: [usize; 3] = [3, 6, 7];
/// 含北向分量的方向
pub const NORTH_SPEEDS: [usize; 3] = [2, 5, 6];
/// 含南向分量的方向
pub const SOUTH_SPEEDS: [usize; 3] = [4, 7, 8];

/// 由 BGK 松弛参数计算运动粘度：ν = (1/6)·(2/ω − 1)
#[inline]
pub fn viscosity(omega: f64) -> f64 {
    1.0 / 6.0 * (2.0 / omega - 1.0)
}

/// 方向 `k` 的二阶截断平衡分布
///
/// `eq_k = w_k · ρ · (1 + 3(e_k·u) + 4.5(e_k·u)² − 1.5|u|²)`
///
/// 在 u = (0, 0) 时精确退化为 `w_k · ρ`。
#[inline]
pub fn equilibrium(k: usize, density: f64, u_x: f64, u_y: f64) -> f64 {
    let (e_x, e_y) = E[k];
    let eu = e_x * u_x + e_y * u_y;
    let u_sq = u_x * u_x + u_y * u_y;
    WEIGHTS[k] * density * (1.0 + 3.0 * eu + 4.5 * eu * eu - 1.5 * u_sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_opposite_is_involution() {
        for k in 0..NSPEEDS {
            assert_eq!(OPPOSITE[OPPOSITE[k]], k);
        }
    }

    #[test]
    fn test_opposite_reverses_lattice_vector() {
        for k in 0..NSPEEDS {
            let (ex, ey) = E[k];
            let (ox, oy) = E[OPPOSITE[k]];
            assert_eq!((ox, oy), (-ex, -ey));
        }
    }

    #[test]
    fn test_source_offset_is_reversed_vector() {
        for k in 0..NSPEEDS {
            let (ex, ey) = E[k];
            let (dr, dc) = SOURCE_OFFSET[k];
            // 行偏移对应 -e_y，列偏移对应 -e_x
            assert_eq!(dr as f64, -ey);
            assert_eq!(dc as f64, -ex);
        }
    }

    #[test]
    fn test_equilibrium_rest_fixed_point() {
        let density = 0.1;
        for k in 0..NSPEEDS {
            let eq = equilibrium(k, density, 0.0, 0.0);
            assert_eq!(eq, WEIGHTS[k] * density);
        }
    }

    #[test]
    fn test_equilibrium_zeroth_moment() {
        // Σ eq_k = ρ（对任意小速度，浮点精度内）
        let (density, u_x, u_y) = (0.85, 0.02, -0.013);
        let sum: f64 = (0..NSPEEDS)
            .map(|k| equilibrium(k, density, u_x, u_y))
            .sum();
        assert!((sum - density).abs() < 1e-14);
    }

    #[test]
    fn test_viscosity() {
        // ω = 1 ⇒ ν = 1/6
        assert!((viscosity(1.0) - 1.0 / 6.0).abs() < 1e-15);
        // ω → 2 ⇒ ν → 0
        assert!(viscosity(1.999) > 0.0);
    }
}
