// crates/mf_fvm/src/relax.rs

//! 隐式（对角）松弛
//!
//! 通过加强对角并补偿源项来改善线性系统的可解性，
//! 松弛因子 `alpha` 属于 `(0, 1]`，越小对角放大越多。
//!
//! # 算法阶段
//!
//! 1. `alpha <= 0` 直接返回，系统零改动
//! 2. 备份未松弛对角 `D0`，累加内部面非对角幅值 `sumOff`
//! 3. 逐补丁把边界贡献并入：耦合补丁取系数第 0 分量进对角、
//!    源侧系数幅值进 `sumOff`；非耦合补丁取最大幅值分量进对角
//! 4. 可选的对角占优诊断（改动对角之前统计）
//! 5. `D = max(|D|, sumOff)`，再除以 `alpha`
//! 6. 逐补丁撤销边界对角贡献：耦合补丁按第 0 分量原样撤销；
//!    非耦合补丁按最小符号分量撤销，与第 3 步加入量不对称，
//!    净效应把两者之差保留在对角上
//! 7. 对角变化量乘以当前场值累加进源项，已收敛的解保持不动
//!
//! # 使用示例
//!
//! ```
//! use mf_fvm::reduce::LocalReduce;
//! use mf_fvm::relax::dominance_report;
//!
//! let diag = vec![4.0, 1.0];
//! let sum_off = vec![2.0, 3.0];
//! let report = dominance_report(&diag, &sum_off, &LocalReduce);
//! assert_eq!(report.non_dominant_cells, 1);
//! assert!((report.max_relative - 2.0).abs() < 1e-14);
//! ```

use crate::addressing::LduAddressing;
use crate::field::VolField;
use crate::matrix::FvMatrix;
use crate::reduce::{GlobalReduce, LocalReduce};
use crate::value::FieldValue;
use mf_foundation::float::safe_div;
use mf_foundation::scalar::{constants, Scalar};

// =============================================================================
// 选项与诊断结果
// =============================================================================

/// 松弛选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxOptions {
    /// 是否在松弛前输出对角占优诊断
    pub diagnostics: bool,
}

/// 对角占优诊断结果
///
/// 统计量为全局值（经归约器聚合）。非占优度定义为
/// `(sumOff - D) / |D|`，仅统计大于零的单元。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominanceReport {
    /// 非占优单元数
    pub non_dominant_cells: usize,
    /// 最大相对非占优度
    pub max_relative: Scalar,
    /// 平均相对非占优度（按全局单元数平均）
    pub avg_relative: Scalar,
}

/// 计算对角占优诊断
///
/// 只读操作，不改动输入。集合语义：分布式场景下所有分区
/// 必须同时调用，归约次序固定为计数、最大值、求和、全局单元数。
///
/// 零对角单元的比值分母以 [`constants::SMALL`] 为下限，
/// 结果巨大但有限。
///
/// # Panics
///
/// - `diag.len() != sum_off.len()`
pub fn dominance_report<R: GlobalReduce>(
    diag: &[Scalar],
    sum_off: &[Scalar],
    reduce: &R,
) -> DominanceReport {
    assert_eq!(
        diag.len(),
        sum_off.len(),
        "diag 与 sum_off 长度必须相等"
    );

    let mut n_non = 0usize;
    let mut max_non: Scalar = 0.0;
    let mut sum_non: Scalar = 0.0;

    for cell in 0..diag.len() {
        let denom = diag[cell].abs().max(constants::SMALL);
        let d = (sum_off[cell] - diag[cell]) / denom;

        if d > 0.0 {
            n_non += 1;
            max_non = max_non.max(d);
            sum_non += d;
        }
    }

    let n_non = reduce.sum_count(n_non);
    let max_non = reduce.max_scalar(max_non);
    let sum_non = reduce.sum_scalar(sum_non);
    let n_global = reduce.sum_count(diag.len());

    DominanceReport {
        non_dominant_cells: n_non,
        max_relative: max_non,
        avg_relative: safe_div(sum_non, n_global as Scalar, 0.0),
    }
}

// =============================================================================
// 矩阵松弛
// =============================================================================

impl<V: FieldValue> FvMatrix<V> {
    /// 隐式松弛（单进程、无诊断）
    ///
    /// 等价于以默认选项和 [`LocalReduce`] 调用 [`Self::relax_with`]。
    pub fn relax(&mut self, addr: &LduAddressing, psi: &VolField<V>, alpha: Scalar) {
        self.relax_with(addr, psi, alpha, &RelaxOptions::default(), &LocalReduce);
    }

    /// 隐式松弛
    ///
    /// 对角按 `max(|D|, sumOff) / alpha` 加强，变化量以当前场值
    /// 折入源项。`psi` 只读，提供场名、补丁耦合标志和内部值。
    ///
    /// # 参数
    ///
    /// - `addr`: 矩阵装配所用的寻址
    /// - `psi`: 该方程的未知场
    /// - `alpha`: 松弛因子，非正时整个调用为空操作
    /// - `opts`: 诊断开关
    /// - `reduce`: 诊断统计的归约器
    ///
    /// # Panics
    ///
    /// 矩阵或场的形状与寻址不一致时 panic（`alpha <= 0` 时不校验，
    /// 直接返回）。
    pub fn relax_with<R: GlobalReduce>(
        &mut self,
        addr: &LduAddressing,
        psi: &VolField<V>,
        alpha: Scalar,
        opts: &RelaxOptions,
        reduce: &R,
    ) {
        // 非正因子表示关闭松弛，系统保持原样
        if alpha <= 0.0 {
            return;
        }

        assert_eq!(
            self.diag.len(),
            addr.n_cells(),
            "矩阵单元数与寻址不一致"
        );
        assert_eq!(
            self.internal_coeffs.len(),
            addr.n_patches(),
            "矩阵补丁数与寻址不一致"
        );
        assert_eq!(
            psi.internal().len(),
            addr.n_cells(),
            "场单元数与寻址不一致"
        );
        assert_eq!(
            psi.n_patches(),
            addr.n_patches(),
            "场补丁数与寻址不一致"
        );

        tracing::debug!("Relaxing {} by {}", psi.name(), alpha);

        // 未松弛对角的副本，第 7 步源项补偿使用
        let d0 = self.diag.clone();

        let mut sum_off = vec![0.0; self.diag.len()];
        self.sum_mag_off_diag(addr, &mut sum_off);

        // 边界贡献并入对角，耦合补丁的源侧系数计入 sumOff
        for patch in 0..addr.n_patches() {
            let ptf = psi.patch(patch);
            if ptf.is_empty() {
                continue;
            }

            let pa = addr.patch_addr(patch);
            let i_coeffs = &self.internal_coeffs[patch];
            debug_assert_eq!(pa.len(), i_coeffs.len(), "补丁 {} 面数不一致", patch);

            if ptf.coupled() {
                let b_coeffs = &self.boundary_coeffs[patch];
                for (face, &cell) in pa.iter().enumerate() {
                    self.diag[cell] += i_coeffs[face].component(0);
                    sum_off[cell] += b_coeffs[face].component(0).abs();
                }
            } else {
                for (face, &cell) in pa.iter().enumerate() {
                    self.diag[cell] += i_coeffs[face].max_magnitude_component();
                }
            }
        }

        if opts.diagnostics {
            let report = dominance_report(&self.diag, &sum_off, reduce);
            tracing::info!("Matrix dominance test for {}", psi.name());
            tracing::info!(
                "  number of non-dominant cells   : {}",
                report.non_dominant_cells
            );
            tracing::info!(
                "  maximum relative non-dominance : {:.3e}",
                report.max_relative
            );
            tracing::info!(
                "  average relative non-dominance : {:.3e}",
                report.avg_relative
            );
        }

        // 占优化，假定中心系数应为正并据此取绝对值
        for cell in 0..self.diag.len() {
            self.diag[cell] = self.diag[cell].abs().max(sum_off[cell]);
        }

        // 松弛放大对角
        for d in self.diag.iter_mut() {
            *d /= alpha;
        }

        // 撤销边界对角贡献。非耦合补丁按最小符号分量撤销，
        // 与并入时的最大幅值分量不对称，两者之差保留在对角上
        for patch in 0..addr.n_patches() {
            let ptf = psi.patch(patch);
            if ptf.is_empty() {
                continue;
            }

            let pa = addr.patch_addr(patch);
            let i_coeffs = &self.internal_coeffs[patch];

            if ptf.coupled() {
                for (face, &cell) in pa.iter().enumerate() {
                    self.diag[cell] -= i_coeffs[face].component(0);
                }
            } else {
                for (face, &cell) in pa.iter().enumerate() {
                    self.diag[cell] -= i_coeffs[face].min_component();
                }
            }
        }

        // 对角变化量按当前场值折入源项，已收敛的解保持不动
        let internal = psi.internal();
        for cell in 0..self.diag.len() {
            self.source[cell] += internal[cell] * (self.diag[cell] - d0[cell]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_foundation::float::{approx_eq, DEFAULT_EPSILON};

    #[test]
    fn test_dominance_report_counts() {
        let diag = vec![2.0, 1.0, -1.0];
        let sum_off = vec![1.0, 2.0, 0.5];
        let report = dominance_report(&diag, &sum_off, &LocalReduce);

        // 单元 1: (2-1)/1 = 1; 单元 2: (0.5+1)/1 = 1.5
        assert_eq!(report.non_dominant_cells, 2);
        assert!(approx_eq(report.max_relative, 1.5, DEFAULT_EPSILON));
        assert!(approx_eq(report.avg_relative, 2.5 / 3.0, DEFAULT_EPSILON));
    }

    #[test]
    fn test_dominance_report_equality_not_counted() {
        let diag = vec![2.0, 2.0];
        let sum_off = vec![2.0, 1.0];
        let report = dominance_report(&diag, &sum_off, &LocalReduce);
        assert_eq!(report.non_dominant_cells, 0);
        assert_eq!(report.max_relative, 0.0);
        assert_eq!(report.avg_relative, 0.0);
    }

    #[test]
    fn test_dominance_report_zero_diag_finite() {
        let diag = vec![0.0, 0.0];
        let sum_off = vec![1.0, 0.0];
        let report = dominance_report(&diag, &sum_off, &LocalReduce);

        // 零对角零邻接的孤立单元不算非占优
        assert_eq!(report.non_dominant_cells, 1);
        assert!(report.max_relative.is_finite());
        assert!(report.avg_relative.is_finite());
        assert!(report.max_relative > 1e14);
    }

    #[test]
    fn test_dominance_report_empty() {
        let report = dominance_report(&[], &[], &LocalReduce);
        assert_eq!(report.non_dominant_cells, 0);
        assert_eq!(report.avg_relative, 0.0);
    }
}
