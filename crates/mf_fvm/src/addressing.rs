// crates/mf_fvm/src/addressing.rs

//! LDU 面寻址
//!
//! 非结构网格的隐式矩阵按"下三角/对角/上三角"三段存储，
//! 内部面由 owner/neighbor 单元对描述，边界面按补丁分组、
//! 逐面映射到其相邻单元。
//!
//! 寻址由网格层一次性构建后只读共享；矩阵本身不持有寻址，
//! 所有矩阵操作以 `&LduAddressing` 为参数。
//!
//! # 约定
//!
//! - `owner[f]` / `neighbor[f]`: 第 f 个内部面两侧的单元编号
//! - `upper[f]` 是 owner 行指向 neighbor 的系数，`lower[f]` 反之
//! - `patch_addr[p][i]`: 补丁 p 第 i 个边界面相邻的单元编号，
//!   允许多对一（角点单元在多个补丁上各出现一次）
//!
//! # 使用示例
//!
//! ```
//! use mf_fvm::addressing::LduAddressing;
//!
//! // 三单元一维链 0-1-2，两端各一个单面补丁
//! let addr = LduAddressing::new(
//!     3,
//!     vec![0, 1],
//!     vec![1, 2],
//!     vec![vec![0], vec![2]],
//! );
//! assert_eq!(addr.n_interior_faces(), 2);
//! assert_eq!(addr.patch_addr(1), &[2]);
//! ```

// =============================================================================
// 寻址结构
// =============================================================================

/// LDU 矩阵寻址
///
/// 构建后不可变。索引有效性在构建时校验，越界立即 panic。
#[derive(Debug, Clone)]
pub struct LduAddressing {
    /// 单元数
    n_cells: usize,
    /// 每个内部面的 owner 单元
    owner: Vec<usize>,
    /// 每个内部面的 neighbor 单元
    neighbor: Vec<usize>,
    /// 每个补丁的面→单元映射
    patch_addr: Vec<Vec<usize>>,
}

impl LduAddressing {
    /// 创建寻址
    ///
    /// # 参数
    ///
    /// - `n_cells`: 单元数
    /// - `owner` / `neighbor`: 内部面两侧单元，长度相等
    /// - `patch_addr`: 逐补丁的面→单元映射，可为空补丁
    ///
    /// # Panics
    ///
    /// - `owner.len() != neighbor.len()`
    /// - 任一单元编号 `>= n_cells`
    /// - 某内部面两侧为同一单元
    pub fn new(
        n_cells: usize,
        owner: Vec<usize>,
        neighbor: Vec<usize>,
        patch_addr: Vec<Vec<usize>>,
    ) -> Self {
        assert_eq!(
            owner.len(),
            neighbor.len(),
            "owner 与 neighbor 长度必须相等"
        );

        for (face, (&o, &n)) in owner.iter().zip(neighbor.iter()).enumerate() {
            assert!(o < n_cells, "内部面 {} 的 owner 越界: {} >= {}", face, o, n_cells);
            assert!(n < n_cells, "内部面 {} 的 neighbor 越界: {} >= {}", face, n, n_cells);
            assert_ne!(o, n, "内部面 {} 两侧为同一单元 {}", face, o);
        }

        for (patch, pa) in patch_addr.iter().enumerate() {
            for (face, &c) in pa.iter().enumerate() {
                assert!(
                    c < n_cells,
                    "补丁 {} 边界面 {} 的单元越界: {} >= {}",
                    patch,
                    face,
                    c,
                    n_cells
                );
            }
        }

        Self {
            n_cells,
            owner,
            neighbor,
            patch_addr,
        }
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// 内部面数
    #[inline]
    pub fn n_interior_faces(&self) -> usize {
        self.owner.len()
    }

    /// 补丁数
    #[inline]
    pub fn n_patches(&self) -> usize {
        self.patch_addr.len()
    }

    /// 所有内部面的 owner 单元
    #[inline]
    pub fn owner(&self) -> &[usize] {
        &self.owner
    }

    /// 所有内部面的 neighbor 单元
    #[inline]
    pub fn neighbor(&self) -> &[usize] {
        &self.neighbor
    }

    /// 补丁 `patch` 的面→单元映射
    #[inline]
    pub fn patch_addr(&self, patch: usize) -> &[usize] {
        &self.patch_addr[patch]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain3() -> LduAddressing {
        LduAddressing::new(3, vec![0, 1], vec![1, 2], vec![vec![0], vec![2]])
    }

    #[test]
    fn test_accessors() {
        let addr = chain3();
        assert_eq!(addr.n_cells(), 3);
        assert_eq!(addr.n_interior_faces(), 2);
        assert_eq!(addr.n_patches(), 2);
        assert_eq!(addr.owner(), &[0, 1]);
        assert_eq!(addr.neighbor(), &[1, 2]);
        assert_eq!(addr.patch_addr(0), &[0]);
    }

    #[test]
    fn test_empty_patch_allowed() {
        let addr = LduAddressing::new(2, vec![0], vec![1], vec![vec![], vec![0, 0]]);
        assert_eq!(addr.patch_addr(0).len(), 0);
        // 角点单元可在同一补丁出现多次
        assert_eq!(addr.patch_addr(1), &[0, 0]);
    }

    #[test]
    fn test_isolated_cells_allowed() {
        let addr = LduAddressing::new(4, vec![], vec![], vec![]);
        assert_eq!(addr.n_cells(), 4);
        assert_eq!(addr.n_interior_faces(), 0);
    }

    #[test]
    #[should_panic(expected = "越界")]
    fn test_owner_out_of_range() {
        LduAddressing::new(2, vec![2], vec![1], vec![]);
    }

    #[test]
    #[should_panic(expected = "同一单元")]
    fn test_self_face_rejected() {
        LduAddressing::new(2, vec![1], vec![1], vec![]);
    }

    #[test]
    #[should_panic(expected = "越界")]
    fn test_patch_cell_out_of_range() {
        LduAddressing::new(2, vec![], vec![], vec![vec![5]]);
    }
}
