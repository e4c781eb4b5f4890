// crates/mf_fvm/src/reduce.rs

//! 全局归约接口
//!
//! 对角占优诊断需要把逐分区的统计量聚合为全局量。归约器由
//! 调用方注入，核心代码对通信后端（MPI、单进程等）无感知。
//!
//! # 集合语义
//!
//! 归约是集合操作：凡进入诊断路径的分区必须全部以相同的
//! 调用次序进入各归约方法，否则分布式后端会死锁。单进程
//! 实现 [`LocalReduce`] 直接返回本地值。

use mf_foundation::scalar::Scalar;

/// 跨分区归约器
///
/// 诊断统计用到三种归约：标量求和、标量取最大、计数求和。
pub trait GlobalReduce: Send + Sync {
    /// 标量求和归约
    fn sum_scalar(&self, local: Scalar) -> Scalar;

    /// 标量最大值归约
    fn max_scalar(&self, local: Scalar) -> Scalar;

    /// 计数求和归约
    fn sum_count(&self, local: usize) -> usize;

    /// 参与归约的分区数
    fn n_ranks(&self) -> usize {
        1
    }
}

/// 单进程恒等归约器
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReduce;

impl GlobalReduce for LocalReduce {
    #[inline]
    fn sum_scalar(&self, local: Scalar) -> Scalar {
        local
    }

    #[inline]
    fn max_scalar(&self, local: Scalar) -> Scalar {
        local
    }

    #[inline]
    fn sum_count(&self, local: usize) -> usize {
        local
    }
}
