// crates/mf_foundation/src/lib.rs

//! MariFvm Foundation Layer
//!
//! 零依赖基础层，提供标量类型与数值工具。
//!
//! # 模块概览
//!
//! - [`scalar`]: 统一标量别名与数值常量
//! - [`float`]: 浮点比较和安全除法
//!
//! # 设计原则
//!
//! 1. **零外部依赖**: 本层不引入任何第三方 crate
//! 2. **唯一精度边界**: 配置层 f64 与计算层 [`scalar::Scalar`] 的转换集中在 `convert`
//! 3. **无 Inf/NaN 泄漏**: 可能零分母的路径统一走 [`float::safe_div`]
//!
//! # 示例
//!
//! ```
//! use mf_foundation::{scalar::Scalar, float::safe_div};
//!
//! let d: Scalar = 0.0;
//! let ratio = safe_div(3.0, d, 0.0);
//! assert_eq!(ratio, 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod float;
pub mod scalar;

// 重导出常用类型
pub use float::{approx_eq, safe_div, DEFAULT_EPSILON};
pub use scalar::Scalar;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::float::{approx_eq, safe_div, DEFAULT_EPSILON, SAFE_DIV_EPSILON};
    pub use crate::scalar::{constants, convert, Scalar};
}
