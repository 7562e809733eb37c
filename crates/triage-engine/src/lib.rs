//! # 分诊引擎模块
//!
//! 提供分诊服务的全部决策逻辑，均为无状态纯函数：
//! - 评分引擎：根据生命体征和症状描述计算稳定性评分
//! - 建议查询：按健康状态返回固定的建议列表
//! - 分诊问题库：按症状类别返回引导式问题
//! - 紧急程度分级：根据问题回答和照护者观察判定严重程度
//! - 症状识别：从自由文本中识别症状类别

pub mod advice;
pub mod classifier;
pub mod detection;
pub mod questions;
pub mod scoring;

// 重新导出主要函数
pub use advice::{advice_for, advice_for_label, FALLBACK_ADVICE};
pub use classifier::{classify, instructions_for, STABLE_INSTRUCTIONS};
pub use detection::detect_category;
pub use questions::questions_for;
pub use scoring::score_vitals;
