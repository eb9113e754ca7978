pub mod cli;
pub mod interpreter;
pub mod logging;
pub mod runtime;
pub mod script;

// 导出 dynarray 供使用方直接引用容器类型
pub use dynarray;
