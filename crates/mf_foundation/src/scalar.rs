// crates/mf_foundation/src/scalar.rs

//! 统一标量类型
//!
//! 矩阵层的对角元、系数和松弛因子都使用 [`Scalar`] 别名，
//! 精度切换只需修改此处一行（配合 `convert` 模块完成边界转换）。
//!
//! # 用法
//!
//! ```
//! use mf_foundation::scalar::Scalar;
//!
//! let alpha: Scalar = 0.7;
//! assert!(alpha > 0.0 && alpha <= 1.0);
//! ```

/// 计算用标量类型
///
/// 固定为 f64。历史上曾通过 feature 在 f32/f64 间切换，
/// 但矩阵层的对角占优判定对舍入误差敏感，统一使用双精度。
pub type Scalar = f64;

/// 数值常量
pub mod constants {
    use super::Scalar;

    /// 极小正值，用作除法分母下限
    ///
    /// 诊断路径中 `|D| == 0` 的单元以此为分母下限，
    /// 得到一个巨大但有限的非占优比值，避免 Inf/NaN。
    pub const SMALL: Scalar = 1e-15;

    /// 对角占优判定的相对容差
    ///
    /// 测试和验证工具允许 `|D| * alpha >= sumOff * (1 - DOMINANCE_REL_TOL)`
    /// 级别的浮点误差。
    pub const DOMINANCE_REL_TOL: Scalar = 1e-12;
}

/// 精度转换辅助函数
///
/// 配置层全部使用 f64 存储；进入计算层时经由此模块转换，
/// 保持唯一的精度边界。
pub mod convert {
    use super::Scalar;

    /// 配置精度 -> 计算精度
    #[inline]
    pub fn from_f64(v: f64) -> Scalar {
        v as Scalar
    }

    /// 计算精度 -> 配置精度（无损）
    #[inline]
    pub fn to_f64(v: Scalar) -> f64 {
        v as f64
    }
}
