// crates/mf_fvm/src/value.rs

//! 场值类型抽象
//!
//! 矩阵源项、边界系数和未知场可以承载标量或向量值。
//! 松弛核心不关心具体维数，只通过 [`FieldValue`] 的分量选择
//! 接口访问值：取第 0 分量、取最大幅值分量、取最小符号分量。
//!
//! 标量实现直接返回自身；向量实现基于 `glam` 的逐分量运算。
//!
//! # 使用示例
//!
//! ```
//! use mf_fvm::value::FieldValue;
//! use glam::DVec2;
//!
//! let v = DVec2::new(2.0, -5.0);
//! assert_eq!(v.component(0), 2.0);
//! assert_eq!(v.max_magnitude_component(), 5.0);
//! assert_eq!(v.min_component(), -5.0);
//! ```

use glam::{DVec2, DVec3};
use mf_foundation::scalar::Scalar;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

/// 场值类型
///
/// 约束覆盖矩阵层需要的全部代数运算：值加减、标量缩放、
/// 原位累加。`Send + Sync` 保证值可跨线程共享。
pub trait FieldValue:
    Copy
    + Clone
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Scalar, Output = Self>
    + AddAssign
{
    /// 分量个数
    const N_COMPONENTS: usize;

    /// 零值
    const ZERO: Self;

    /// 取第 `cmpt` 个分量
    ///
    /// # 参数
    ///
    /// - `cmpt`: 分量下标，必须小于 [`Self::N_COMPONENTS`]
    fn component(self, cmpt: usize) -> Scalar;

    /// 最大幅值分量：`max_i |c_i|`
    fn max_magnitude_component(self) -> Scalar;

    /// 最小符号分量：`min_i c_i`（带符号，不取绝对值）
    fn min_component(self) -> Scalar;
}

// =============================================================================
// 标量实现
// =============================================================================

impl FieldValue for Scalar {
    const N_COMPONENTS: usize = 1;
    const ZERO: Self = 0.0;

    #[inline]
    fn component(self, cmpt: usize) -> Scalar {
        debug_assert_eq!(cmpt, 0, "标量只有分量 0");
        self
    }

    #[inline]
    fn max_magnitude_component(self) -> Scalar {
        self.abs()
    }

    #[inline]
    fn min_component(self) -> Scalar {
        self
    }
}

// =============================================================================
// 向量实现（glam 双精度）
// =============================================================================

impl FieldValue for DVec2 {
    const N_COMPONENTS: usize = 2;
    const ZERO: Self = DVec2::ZERO;

    #[inline]
    fn component(self, cmpt: usize) -> Scalar {
        self[cmpt]
    }

    #[inline]
    fn max_magnitude_component(self) -> Scalar {
        self.abs().max_element()
    }

    #[inline]
    fn min_component(self) -> Scalar {
        self.min_element()
    }
}

impl FieldValue for DVec3 {
    const N_COMPONENTS: usize = 3;
    const ZERO: Self = DVec3::ZERO;

    #[inline]
    fn component(self, cmpt: usize) -> Scalar {
        self[cmpt]
    }

    #[inline]
    fn max_magnitude_component(self) -> Scalar {
        self.abs().max_element()
    }

    #[inline]
    fn min_component(self) -> Scalar {
        self.min_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_selectors() {
        let v: Scalar = -3.5;
        assert_eq!(v.component(0), -3.5);
        assert_eq!(v.max_magnitude_component(), 3.5);
        assert_eq!(v.min_component(), -3.5);
    }

    #[test]
    fn test_dvec2_selectors() {
        let v = DVec2::new(2.0, 5.0);
        assert_eq!(v.component(0), 2.0);
        assert_eq!(v.component(1), 5.0);
        assert_eq!(v.max_magnitude_component(), 5.0);
        assert_eq!(v.min_component(), 2.0);
    }

    #[test]
    fn test_dvec3_mixed_signs() {
        let v = DVec3::new(-4.0, 1.0, 3.0);
        assert_eq!(v.max_magnitude_component(), 4.0);
        assert_eq!(v.min_component(), -4.0);
    }

    #[test]
    fn test_scale_and_accumulate() {
        let mut s = DVec2::new(1.0, 1.0);
        s += DVec2::new(0.5, -0.5) * 2.0;
        assert_eq!(s, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_zero_constants() {
        assert_eq!(<Scalar as FieldValue>::ZERO, 0.0);
        assert_eq!(<DVec2 as FieldValue>::ZERO, DVec2::ZERO);
        assert_eq!(DVec3::N_COMPONENTS, 3);
    }
}
