// crates/mf_fvm/src/matrix.rs

//! 隐式有限体积矩阵
//!
//! 按 LDU 三段存储线性系统 `A x = b`：
//! - `diag`: 逐单元对角系数（标量）
//! - `upper` / `lower`: 逐内部面的上/下三角系数（标量），
//!   `upper[f]` 作用于 owner 行、乘 neighbor 单元的未知量
//! - `source`: 逐单元源项（场值类型）
//! - `internal_coeffs` / `boundary_coeffs`: 逐补丁逐面的边界条件
//!   贡献，离散化阶段写入，求解与松弛阶段读取
//!
//! 矩阵不持有寻址。所有遍历内部面或补丁的操作以
//! [`LduAddressing`] 为参数，与离散化装配器共享同一份寻址。
//!
//! # 特性开关
//!
//! - `parallel`: 矩阵-向量乘法的逐单元部分使用 `rayon` 并行
//!   （面散射部分存在写冲突，保持串行）
//!
//! # 使用示例
//!
//! ```
//! use mf_fvm::addressing::LduAddressing;
//! use mf_fvm::matrix::FvMatrix;
//!
//! // 两单元系统: [2 -1; -1 2] x = b
//! let addr = LduAddressing::new(2, vec![0], vec![1], vec![]);
//! let mut m = FvMatrix::<f64>::new(&addr);
//! m.diag_mut().fill(2.0);
//! m.upper_mut()[0] = -1.0;
//! m.lower_mut()[0] = -1.0;
//!
//! let x = vec![1.0, 3.0];
//! let mut y = vec![0.0; 2];
//! m.mul_vec(&addr, &x, &mut y);
//! assert_eq!(y, vec![-1.0, 5.0]);
//! ```

use crate::addressing::LduAddressing;
use crate::value::FieldValue;
use mf_foundation::scalar::Scalar;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =============================================================================
// 矩阵主体
// =============================================================================

/// LDU 格式隐式矩阵
///
/// 由离散化装配器就地写入系数，生命周期内形状不变。
#[derive(Debug, Clone, PartialEq)]
pub struct FvMatrix<V: FieldValue> {
    /// 逐单元对角系数
    pub(crate) diag: Vec<Scalar>,
    /// 逐内部面上三角系数（owner 行）
    pub(crate) upper: Vec<Scalar>,
    /// 逐内部面下三角系数（neighbor 行）
    pub(crate) lower: Vec<Scalar>,
    /// 逐单元源项
    pub(crate) source: Vec<V>,
    /// 逐补丁逐面的对角侧边界贡献
    pub(crate) internal_coeffs: Vec<Vec<V>>,
    /// 逐补丁逐面的源侧边界贡献
    pub(crate) boundary_coeffs: Vec<Vec<V>>,
}

impl<V: FieldValue> FvMatrix<V> {
    /// 按寻址形状创建零系数矩阵
    pub fn new(addr: &LduAddressing) -> Self {
        let n_faces = addr.n_interior_faces();
        Self {
            diag: vec![0.0; addr.n_cells()],
            upper: vec![0.0; n_faces],
            lower: vec![0.0; n_faces],
            source: vec![V::ZERO; addr.n_cells()],
            internal_coeffs: (0..addr.n_patches())
                .map(|p| vec![V::ZERO; addr.patch_addr(p).len()])
                .collect(),
            boundary_coeffs: (0..addr.n_patches())
                .map(|p| vec![V::ZERO; addr.patch_addr(p).len()])
                .collect(),
        }
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.diag.len()
    }

    /// 内部面数
    #[inline]
    pub fn n_interior_faces(&self) -> usize {
        self.upper.len()
    }

    /// 补丁数
    #[inline]
    pub fn n_patches(&self) -> usize {
        self.internal_coeffs.len()
    }

    /// 对角系数
    #[inline]
    pub fn diag(&self) -> &[Scalar] {
        &self.diag
    }

    /// 对角系数（可变）
    #[inline]
    pub fn diag_mut(&mut self) -> &mut [Scalar] {
        &mut self.diag
    }

    /// 上三角系数
    #[inline]
    pub fn upper(&self) -> &[Scalar] {
        &self.upper
    }

    /// 上三角系数（可变）
    #[inline]
    pub fn upper_mut(&mut self) -> &mut [Scalar] {
        &mut self.upper
    }

    /// 下三角系数
    #[inline]
    pub fn lower(&self) -> &[Scalar] {
        &self.lower
    }

    /// 下三角系数（可变）
    #[inline]
    pub fn lower_mut(&mut self) -> &mut [Scalar] {
        &mut self.lower
    }

    /// 源项
    #[inline]
    pub fn source(&self) -> &[V] {
        &self.source
    }

    /// 源项（可变）
    #[inline]
    pub fn source_mut(&mut self) -> &mut [V] {
        &mut self.source
    }

    /// 补丁 `patch` 的对角侧边界贡献
    #[inline]
    pub fn internal_coeffs(&self, patch: usize) -> &[V] {
        &self.internal_coeffs[patch]
    }

    /// 补丁 `patch` 的对角侧边界贡献（可变）
    #[inline]
    pub fn internal_coeffs_mut(&mut self, patch: usize) -> &mut [V] {
        &mut self.internal_coeffs[patch]
    }

    /// 补丁 `patch` 的源侧边界贡献
    #[inline]
    pub fn boundary_coeffs(&self, patch: usize) -> &[V] {
        &self.boundary_coeffs[patch]
    }

    /// 补丁 `patch` 的源侧边界贡献（可变）
    #[inline]
    pub fn boundary_coeffs_mut(&mut self, patch: usize) -> &mut [V] {
        &mut self.boundary_coeffs[patch]
    }

    // =========================================================================
    // 矩阵操作
    // =========================================================================

    /// 逐单元累加非对角系数幅值
    ///
    /// 每个内部面向两侧单元各贡献一次对侧系数的绝对值：
    /// `sum_off[owner[f]] += |upper[f]|`，
    /// `sum_off[neighbor[f]] += |lower[f]|`。
    /// `sum_off` 先清零再累加，孤立单元保持 0。
    ///
    /// # Panics
    ///
    /// - `sum_off.len() != self.n_cells()`
    /// - 寻址的面数与矩阵不一致
    pub fn sum_mag_off_diag(&self, addr: &LduAddressing, sum_off: &mut [Scalar]) {
        assert_eq!(
            sum_off.len(),
            self.diag.len(),
            "sum_off 长度必须等于单元数"
        );
        assert_eq!(
            addr.n_interior_faces(),
            self.upper.len(),
            "寻址面数与矩阵不一致"
        );

        sum_off.fill(0.0);

        let owner = addr.owner();
        let neighbor = addr.neighbor();
        for face in 0..self.upper.len() {
            sum_off[owner[face]] += self.upper[face].abs();
            sum_off[neighbor[face]] += self.lower[face].abs();
        }
    }

    /// 矩阵-向量乘法 `y = A x`（内部装配算子）
    ///
    /// 仅含对角与内部面系数，边界贡献不参与。
    ///
    /// # Panics
    ///
    /// - `x.len()` 或 `y.len()` 不等于单元数
    /// - 寻址的面数与矩阵不一致
    pub fn mul_vec(&self, addr: &LduAddressing, x: &[V], y: &mut [V]) {
        assert_eq!(x.len(), self.diag.len(), "x 长度必须等于单元数");
        assert_eq!(y.len(), self.diag.len(), "y 长度必须等于单元数");
        assert_eq!(
            addr.n_interior_faces(),
            self.upper.len(),
            "寻址面数与矩阵不一致"
        );

        self.diag_mul(x, y);

        let owner = addr.owner();
        let neighbor = addr.neighbor();
        for face in 0..self.upper.len() {
            y[owner[face]] += x[neighbor[face]] * self.upper[face];
            y[neighbor[face]] += x[owner[face]] * self.lower[face];
        }
    }

    /// 残差 `r = source − A x`（内部装配算子）
    pub fn residual(&self, addr: &LduAddressing, x: &[V]) -> Vec<V> {
        let mut ax = vec![V::ZERO; self.diag.len()];
        self.mul_vec(addr, x, &mut ax);

        self.source
            .iter()
            .zip(ax.iter())
            .map(|(&s, &a)| s - a)
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn diag_mul(&self, x: &[V], y: &mut [V]) {
        for c in 0..y.len() {
            y[c] = x[c] * self.diag[c];
        }
    }

    #[cfg(feature = "parallel")]
    fn diag_mul(&self, x: &[V], y: &mut [V]) {
        y.par_iter_mut().enumerate().for_each(|(c, out)| {
            *out = x[c] * self.diag[c];
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use mf_foundation::float::DEFAULT_EPSILON;

    fn chain3() -> LduAddressing {
        LduAddressing::new(3, vec![0, 1], vec![1, 2], vec![vec![0], vec![2]])
    }

    #[test]
    fn test_new_shapes() {
        let addr = chain3();
        let m = FvMatrix::<f64>::new(&addr);
        assert_eq!(m.n_cells(), 3);
        assert_eq!(m.n_interior_faces(), 2);
        assert_eq!(m.n_patches(), 2);
        assert_eq!(m.internal_coeffs(0).len(), 1);
        assert!(m.diag().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_sum_mag_off_diag() {
        let addr = chain3();
        let mut m = FvMatrix::<f64>::new(&addr);
        m.upper_mut().copy_from_slice(&[-1.0, -2.0]);
        m.lower_mut().copy_from_slice(&[3.0, -4.0]);

        let mut sum_off = vec![9.0; 3];
        m.sum_mag_off_diag(&addr, &mut sum_off);

        // 单元 0: |upper[0]|；单元 1: |lower[0]| + |upper[1]|；单元 2: |lower[1]|
        assert_eq!(sum_off, vec![1.0, 5.0, 4.0]);
    }

    #[test]
    fn test_sum_mag_off_diag_isolated_cell() {
        let addr = LduAddressing::new(3, vec![0], vec![1], vec![]);
        let mut m = FvMatrix::<f64>::new(&addr);
        m.upper_mut()[0] = -1.0;
        m.lower_mut()[0] = -1.0;

        let mut sum_off = vec![0.0; 3];
        m.sum_mag_off_diag(&addr, &mut sum_off);
        assert_eq!(sum_off[2], 0.0);
    }

    #[test]
    fn test_mul_vec_chain() {
        let addr = chain3();
        let mut m = FvMatrix::<f64>::new(&addr);
        m.diag_mut().copy_from_slice(&[2.0, 2.0, 2.0]);
        m.upper_mut().copy_from_slice(&[-1.0, -1.0]);
        m.lower_mut().copy_from_slice(&[-1.0, -1.0]);

        let x = vec![1.0, 2.0, 3.0];
        let mut y = vec![0.0; 3];
        m.mul_vec(&addr, &x, &mut y);

        assert!((y[0] - 0.0).abs() < DEFAULT_EPSILON);
        assert!((y[1] - 0.0).abs() < DEFAULT_EPSILON);
        assert!((y[2] - 4.0).abs() < DEFAULT_EPSILON);
    }

    #[test]
    fn test_mul_vec_vector_values() {
        let addr = LduAddressing::new(2, vec![0], vec![1], vec![]);
        let mut m = FvMatrix::<DVec2>::new(&addr);
        m.diag_mut().copy_from_slice(&[1.0, 2.0]);
        m.upper_mut()[0] = 0.5;
        m.lower_mut()[0] = -0.5;

        let x = vec![DVec2::new(2.0, 4.0), DVec2::new(-2.0, 0.0)];
        let mut y = vec![DVec2::ZERO; 2];
        m.mul_vec(&addr, &x, &mut y);

        assert_eq!(y[0], DVec2::new(1.0, 4.0));
        assert_eq!(y[1], DVec2::new(-5.0, -2.0));
    }

    #[test]
    fn test_residual_consistent_system() {
        let addr = chain3();
        let mut m = FvMatrix::<f64>::new(&addr);
        m.diag_mut().copy_from_slice(&[2.0, 2.0, 2.0]);
        m.upper_mut().copy_from_slice(&[-1.0, -1.0]);
        m.lower_mut().copy_from_slice(&[-1.0, -1.0]);

        // source = A x 时残差为零
        let x = vec![1.0, 2.0, 2.0];
        let mut ax = vec![0.0; 3];
        m.mul_vec(&addr, &x, &mut ax);
        m.source_mut().copy_from_slice(&ax);

        let r = m.residual(&addr, &x);
        assert!(r.iter().all(|v| v.abs() < DEFAULT_EPSILON));
    }

    #[test]
    #[should_panic(expected = "x 长度")]
    fn test_mul_vec_length_mismatch() {
        let addr = chain3();
        let m = FvMatrix::<f64>::new(&addr);
        let x = vec![0.0; 2];
        let mut y = vec![0.0; 3];
        m.mul_vec(&addr, &x, &mut y);
    }
}
