// crates/mf_config/src/relaxation.rs

//! RelaxationControls - 方程松弛控制（全 f64）
//!
//! 以方程名（即未知场名）为键配置隐式松弛因子，JSON 持久化。
//! 未配置因子的方程不做松弛。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// 方程松弛控制
///
/// 因子查找顺序：逐方程表 `equations` 优先，否则退回
/// `default_factor`，两者都没有时该方程不松弛。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelaxationControls {
    /// 缺省松弛因子，None 表示未列出的方程不松弛
    #[serde(default)]
    pub default_factor: Option<f64>,

    /// 逐方程松弛因子
    #[serde(default)]
    pub equations: HashMap<String, f64>,

    /// 是否输出对角占优诊断
    #[serde(default)]
    pub diagnostics: bool,
}

impl RelaxationControls {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let controls: RelaxationControls =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        controls.validate()?;
        Ok(controls)
    }

    /// 验证配置有效性
    ///
    /// 所有因子必须落在 `(0, 1]`。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(factor) = self.default_factor {
            Self::check_factor("default_factor", factor)?;
        }

        for (equation, &factor) in &self.equations {
            Self::check_factor(&format!("equations.{}", equation), factor)?;
        }

        Ok(())
    }

    fn check_factor(key: &str, factor: f64) -> Result<(), ConfigError> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: factor.to_string(),
                reason: "松弛因子必须在 (0, 1] 范围内".to_string(),
            });
        }
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 查询方程的松弛因子
    pub fn factor_for(&self, equation: &str) -> Option<f64> {
        self.equations
            .get(equation)
            .copied()
            .or(self.default_factor)
    }

    /// 方程是否配置了松弛
    pub fn relax_equation(&self, equation: &str) -> bool {
        self.factor_for(equation).is_some()
    }

    /// 查询方程的松弛因子，未配置时返回 [`ConfigError::Missing`]
    pub fn require_factor(&self, equation: &str) -> Result<f64, ConfigError> {
        self.factor_for(equation)
            .ok_or_else(|| ConfigError::Missing(format!("方程 {} 的松弛因子", equation)))
    }
}
