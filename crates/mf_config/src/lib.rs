// crates/mf_config/src/lib.rs

//! MariFvm Config Layer (Layer 4)
//!
//! 配置层，提供方程松弛控制的加载、校验与持久化。
//! 本层完全无泛型，数值一律 f64，进入计算层时再转换。
//!
//! # 模块概览
//!
//! - [`relaxation`]: RelaxationControls 方程松弛控制
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: mf_cli        ─> uses RelaxationControls
//! Layer 4: mf_config     ─> RelaxationControls, ConfigError (本层)
//! Layer 3: mf_fvm        ─> FvMatrix::relax_with
//! Layer 1: mf_foundation
//! ```
//!
//! # 设计原则
//!
//! 1. **无泛型**: 本层所有类型都不包含泛型参数
//! 2. **全 f64 配置**: 数值字段使用 f64 以便 JSON 序列化
//! 3. **加载即校验**: `from_file` 成功返回的配置必然通过 `validate`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod relaxation;

/// 层级标识
pub const LAYER: u8 = 4;

// 重导出核心类型
pub use error::ConfigError;
pub use relaxation::RelaxationControls;
