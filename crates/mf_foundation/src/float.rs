// crates/mf_foundation/src/float.rs

//! 浮点比较与安全运算
//!
//! 计算层禁止裸除法出现在可能零分母的路径上，统一经由 [`safe_div`]。

use crate::scalar::Scalar;

/// 默认浮点比较精度
pub const DEFAULT_EPSILON: Scalar = 1e-14;

/// 安全除法的分母阈值
pub const SAFE_DIV_EPSILON: Scalar = 1e-14;

/// 近似相等判断
///
/// # 参数
///
/// - `a`, `b`: 待比较的值
/// - `epsilon`: 绝对容差
#[inline]
pub fn approx_eq(a: Scalar, b: Scalar, epsilon: Scalar) -> bool {
    (a - b).abs() < epsilon
}

/// 安全除法
///
/// 分母绝对值小于 [`SAFE_DIV_EPSILON`] 时返回 `default`，
/// 避免产生 Inf/NaN 污染下游统计。
///
/// # 参数
///
/// - `numerator`: 分子
/// - `denominator`: 分母
/// - `default`: 分母过小时的返回值
#[inline]
pub fn safe_div(numerator: Scalar, denominator: Scalar, default: Scalar) -> Scalar {
    if denominator.abs() < SAFE_DIV_EPSILON {
        default
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-15, DEFAULT_EPSILON));
        assert!(!approx_eq(1.0, 1.1, DEFAULT_EPSILON));
    }

    #[test]
    fn test_safe_div_normal() {
        assert!((safe_div(10.0, 4.0, 0.0) - 2.5).abs() < DEFAULT_EPSILON);
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(10.0, 0.0, -1.0), -1.0);
        assert_eq!(safe_div(10.0, 1e-300, 7.0), 7.0);
    }
}
