// crates/mf_fvm/src/field.rs

//! 体积场
//!
//! 未知场按"内部单元值 + 逐补丁边界值"组织。矩阵层只读取场：
//! 内部值参与源项补偿，补丁的耦合标志决定边界系数的聚合方式。
//!
//! # 使用示例
//!
//! ```
//! use mf_fvm::addressing::LduAddressing;
//! use mf_fvm::field::VolField;
//!
//! let addr = LduAddressing::new(2, vec![0], vec![1], vec![vec![0], vec![1]]);
//! let t = VolField::uniform("T", &addr, 300.0, &[false, true]);
//! assert_eq!(t.internal(), &[300.0, 300.0]);
//! assert!(!t.patch(0).coupled());
//! assert!(t.patch(1).coupled());
//! ```

use crate::addressing::LduAddressing;
use crate::value::FieldValue;

// =============================================================================
// 补丁场
// =============================================================================

/// 单个边界补丁上的场值
///
/// `coupled` 标志表征补丁类型的能力而非具体边界条件：
/// 耦合补丁（处理器间、循环等）在松弛时同时计入对角和
/// 非对角聚合，非耦合补丁只按幅值加强对角。
#[derive(Debug, Clone, PartialEq)]
pub struct PatchField<V: FieldValue> {
    /// 补丁是否耦合
    coupled: bool,
    /// 逐边界面的场值
    values: Vec<V>,
}

impl<V: FieldValue> PatchField<V> {
    /// 创建补丁场
    pub fn new(coupled: bool, values: Vec<V>) -> Self {
        Self { coupled, values }
    }

    /// 补丁是否耦合
    #[inline]
    pub fn coupled(&self) -> bool {
        self.coupled
    }

    /// 边界面数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 补丁是否为空（零个边界面）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 逐面场值
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// 逐面场值（可变）
    #[inline]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }
}

// =============================================================================
// 体积场
// =============================================================================

/// 带边界补丁的单元中心场
#[derive(Debug, Clone, PartialEq)]
pub struct VolField<V: FieldValue> {
    /// 场名（日志与配置查找用）
    name: String,
    /// 逐单元内部值
    internal: Vec<V>,
    /// 逐补丁边界场，顺序与寻址的补丁顺序一致
    boundary: Vec<PatchField<V>>,
}

impl<V: FieldValue> VolField<V> {
    /// 创建体积场
    ///
    /// # 参数
    ///
    /// - `name`: 场名
    /// - `addr`: 寻址，用于校验形状
    /// - `internal`: 逐单元值，长度必须为 `addr.n_cells()`
    /// - `boundary`: 逐补丁边界场，个数与各补丁面数必须与寻址一致
    ///
    /// # Panics
    ///
    /// 形状与寻址不一致时 panic。
    pub fn new(
        name: impl Into<String>,
        addr: &LduAddressing,
        internal: Vec<V>,
        boundary: Vec<PatchField<V>>,
    ) -> Self {
        assert_eq!(
            internal.len(),
            addr.n_cells(),
            "内部值长度必须等于单元数"
        );
        assert_eq!(
            boundary.len(),
            addr.n_patches(),
            "边界补丁个数必须与寻址一致"
        );
        for (patch, pf) in boundary.iter().enumerate() {
            assert_eq!(
                pf.len(),
                addr.patch_addr(patch).len(),
                "补丁 {} 的面数与寻址不一致",
                patch
            );
        }

        Self {
            name: name.into(),
            internal,
            boundary,
        }
    }

    /// 创建均匀场
    ///
    /// 内部与所有边界面取同一值，补丁耦合标志由 `coupled` 给出。
    pub fn uniform(
        name: impl Into<String>,
        addr: &LduAddressing,
        value: V,
        coupled: &[bool],
    ) -> Self {
        assert_eq!(
            coupled.len(),
            addr.n_patches(),
            "耦合标志个数必须与补丁数一致"
        );

        let boundary = coupled
            .iter()
            .enumerate()
            .map(|(patch, &c)| PatchField::new(c, vec![value; addr.patch_addr(patch).len()]))
            .collect();

        Self {
            name: name.into(),
            internal: vec![value; addr.n_cells()],
            boundary,
        }
    }

    /// 场名
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 逐单元内部值
    #[inline]
    pub fn internal(&self) -> &[V] {
        &self.internal
    }

    /// 逐单元内部值（可变）
    #[inline]
    pub fn internal_mut(&mut self) -> &mut [V] {
        &mut self.internal
    }

    /// 补丁数
    #[inline]
    pub fn n_patches(&self) -> usize {
        self.boundary.len()
    }

    /// 第 `patch` 个补丁场
    #[inline]
    pub fn patch(&self, patch: usize) -> &PatchField<V> {
        &self.boundary[patch]
    }
}
