// apps/mf_cli/src/commands/mod.rs

//! 命令实现

pub mod relax;
pub mod validate;
