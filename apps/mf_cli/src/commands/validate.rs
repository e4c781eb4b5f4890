// apps/mf_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 验证松弛控制配置文件的正确性。

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== MariFvm 配置验证 ===");

    let mut result = ValidationResult::default();

    if let Some(config_path) = &args.config {
        validate_config(config_path, &mut result)?;
    } else {
        println!("用法: mf_cli validate --config <配置文件> [--strict]");
        return Ok(());
    }

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &PathBuf, result: &mut ValidationResult) -> Result<()> {
    println!("\n检查配置文件: {}", path.display());

    // 检查文件是否存在
    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return Ok(());
    }

    // 读取文件
    let content = std::fs::read_to_string(path).context("无法读取配置文件")?;

    // 尝试解析 JSON
    let json: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            result.add_error(format!("JSON 解析错误: {}", e));
            return Ok(());
        }
    };

    validate_controls_fields(&json, result);

    println!("  ✓ 配置文件格式有效");

    Ok(())
}

fn validate_controls_fields(json: &serde_json::Value, result: &mut ValidationResult) {
    // 检查缺省松弛因子
    if let Some(factor) = json.get("default_factor") {
        if !factor.is_null() {
            match factor.as_f64() {
                Some(v) => check_factor_value("default_factor", v, result),
                None => result.add_error("default_factor 字段应为数值或 null"),
            }
        }
    }

    // 检查逐方程因子表
    if let Some(equations) = json.get("equations") {
        match equations.as_object() {
            Some(map) => {
                for (equation, value) in map {
                    match value.as_f64() {
                        Some(v) => {
                            check_factor_value(&format!("equations.{}", equation), v, result)
                        }
                        None => result
                            .add_error(format!("equations.{} 字段应为数值", equation)),
                    }
                }
            }
            None => result.add_error("equations 字段应为对象"),
        }
    }

    // 检查诊断开关
    if let Some(diagnostics) = json.get("diagnostics") {
        if !diagnostics.is_boolean() {
            result.add_error("diagnostics 字段应为布尔值");
        }
    }

    // 未知键提示（拼写错误常见来源）
    if let Some(map) = json.as_object() {
        for key in map.keys() {
            if !matches!(key.as_str(), "default_factor" | "equations" | "diagnostics") {
                result.add_warning(format!("未知配置键: {}", key));
            }
        }
    }
}

fn check_factor_value(key: &str, value: f64, result: &mut ValidationResult) {
    if value <= 0.0 || value > 1.0 {
        result.add_error(format!("{} = {} 超出 (0, 1] 范围", key, value));
    } else if value < 0.1 {
        result.add_warning(format!("{} = {} 很小，收敛可能极慢", key, value));
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    // 输出错误
    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    // 输出警告
    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    // 最终判定
    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
