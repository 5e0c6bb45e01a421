//! SRSystem - 学生档案管理平台后端服务
//!
//! 基于 Actix Web 构建的学生登记、邮箱验证、课程资料与测验评估系统后端。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 鉴权与限速中间件
//! - `models`: 数据模型定义
//! - `notify`: 验证码投递通道
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod notify;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
