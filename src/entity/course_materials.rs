//! 课程资料实体
//!
//! 文件字节直接入库，内容对本层不透明。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub content: Vec<u8>,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 列表场景只需要元数据，字节另走下载通道
    pub fn into_material_info(self) -> crate::models::materials::entities::MaterialInfo {
        use crate::models::materials::entities::MaterialInfo;
        use chrono::{DateTime, Utc};

        MaterialInfo {
            id: self.id,
            course: self.course,
            title: self.title,
            description: self.description,
            file_name: self.file_name,
            content_type: self.content_type,
            file_size: self.file_size,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }

    pub fn into_material(self) -> crate::models::materials::entities::CourseMaterial {
        use crate::models::materials::entities::CourseMaterial;
        use chrono::{DateTime, Utc};

        CourseMaterial {
            id: self.id,
            course: self.course,
            title: self.title,
            description: self.description,
            file_name: self.file_name,
            content_type: self.content_type,
            file_size: self.file_size,
            content: self.content,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
