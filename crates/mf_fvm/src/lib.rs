// crates/mf_fvm/src/lib.rs

//! MariFvm 隐式有限体积矩阵层
//!
//! 面向单元中心有限体积离散的 LDU 线性系统：寻址、体积场、
//! 矩阵容器，以及求解前的隐式（对角）松弛。
//!
//! # 模块概览
//!
//! - [`addressing`]: owner/neighbor 内部面寻址与补丁面→单元映射
//! - [`value`]: 标量/向量场值的分量选择抽象
//! - [`field`]: 内部值加逐补丁边界值的体积场
//! - [`matrix`]: LDU 矩阵容器与矩阵-向量运算
//! - [`relax`]: 对角占优化松弛与占优诊断
//! - [`reduce`]: 诊断统计的可注入归约接口
//!
//! # 设计原则
//!
//! 1. **寻址外置**: 矩阵不持有寻址，操作以 `&LduAddressing` 传入
//! 2. **形状不变**: 系统创建后零改动形状，装配只改值
//! 3. **快速失败**: 形状不一致立即 panic，核心层无错误类型
//!
//! # 使用示例
//!
//! 单单元、单个非耦合边界面的最小方程，松弛因子 0.5：
//!
//! ```
//! use mf_fvm::prelude::*;
//!
//! let addr = LduAddressing::new(1, vec![], vec![], vec![vec![0]]);
//! let psi = VolField::uniform("T", &addr, 2.0, &[false]);
//!
//! let mut m = FvMatrix::<f64>::new(&addr);
//! m.diag_mut()[0] = 1.0;
//! m.internal_coeffs_mut(0)[0] = 4.0;
//!
//! m.relax(&addr, &psi, 0.5);
//!
//! // 对角 1 -> (1+4) -> max(5,0) -> /0.5 -> 10 -> 撤销 4 -> 6
//! assert!((m.diag()[0] - 6.0).abs() < 1e-14);
//! // 源项补偿 (6-1) * 2
//! assert!((m.source()[0] - 10.0).abs() < 1e-14);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod addressing;
pub mod field;
pub mod matrix;
pub mod reduce;
pub mod relax;
pub mod value;

// 重导出常用类型
pub use addressing::LduAddressing;
pub use field::{PatchField, VolField};
pub use matrix::FvMatrix;
pub use reduce::{GlobalReduce, LocalReduce};
pub use relax::{dominance_report, DominanceReport, RelaxOptions};
pub use value::FieldValue;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::addressing::LduAddressing;
    pub use crate::field::{PatchField, VolField};
    pub use crate::matrix::FvMatrix;
    pub use crate::reduce::{GlobalReduce, LocalReduce};
    pub use crate::relax::{dominance_report, DominanceReport, RelaxOptions};
    pub use crate::value::FieldValue;
}
