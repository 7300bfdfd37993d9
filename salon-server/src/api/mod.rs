//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`users`] - 用户管理 (管理桥接接口 + 资料列表)
//! - [`rooms`] - salón 管理接口
//! - [`layouts`] - 分布 (distribución) 管理接口
//! - [`clients`] - 客户登记接口
//! - [`services`] - 附加服务和分类接口
//! - [`reservations`] - 预订引擎接口 (含报价导出)
//! - [`dashboard`] - 日历和 KPI 聚合接口

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod layouts;
pub mod reservations;
pub mod rooms;
pub mod services;
pub mod users;
