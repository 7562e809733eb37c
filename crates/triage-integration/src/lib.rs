//! # 分诊集成模块
//!
//! 提供与外部系统的集成功能，目前包括：
//! - 附近医疗机构查询，基于OpenStreetMap Overpass API
//! - 离线模式下的静态机构列表
//! - 查询结果的距离排序、按名称去重和数量截断

pub mod facilities;

pub use facilities::{
    rank_facilities, FacilityLookupConfig, FacilityProvider, OverpassProvider,
    StaticFacilityProvider,
};
