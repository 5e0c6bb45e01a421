//! 课程资料存储操作
//!
//! 列表只返回元数据，完整字节仅在下载时取出。

use super::SeaOrmStorage;
use crate::entity::course_materials::{ActiveModel, Column, Entity as CourseMaterials};
use crate::errors::{Result, SRSystemError};
use crate::models::{
    PaginationInfo,
    materials::{
        entities::{CourseMaterial, MaterialInfo},
        requests::MaterialListQuery,
        responses::MaterialListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 发布课程资料
    pub async fn create_material_impl(
        &self,
        course: &str,
        title: &str,
        description: Option<String>,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<MaterialInfo> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course: Set(course.to_string()),
            title: Set(title.to_string()),
            description: Set(description),
            file_name: Set(file_name.to_string()),
            content_type: Set(content_type.to_string()),
            file_size: Set(content.len() as i64),
            content: Set(content),
            uploaded_at: Set(now),
            ..Default::default()
        };

        let material = model
            .insert(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("发布资料失败: {e}")))?;

        Ok(material.into_material_info())
    }

    /// 分页列出资料元数据
    pub async fn list_materials_with_pagination_impl(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = CourseMaterials::find();

        if let Some(ref course) = query.course
            && !course.trim().is_empty()
        {
            select = select.filter(Column::Course.eq(course.trim()));
        }

        select = select.order_by_desc(Column::UploadedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询资料总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询资料页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(MaterialListResponse {
            items: rows.into_iter().map(|m| m.into_material_info()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 取完整资料（含字节）用于下载
    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<CourseMaterial>> {
        let result = CourseMaterials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 删除资料，返回是否确有删除
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = CourseMaterials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn material_round_trip_preserves_bytes() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let bytes = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff, 0x10];

        let info = storage
            .create_material_impl(
                "Web Development",
                "Week 1 Slides",
                Some("Intro deck".to_string()),
                "week1.pdf",
                "application/pdf",
                bytes.clone(),
            )
            .await
            .unwrap();
        assert_eq!(info.file_size, bytes.len() as i64);

        let material = storage
            .get_material_by_id_impl(info.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(material.content, bytes);
        assert_eq!(material.content_type, "application/pdf");
        assert_eq!(material.file_name, "week1.pdf");
    }

    #[tokio::test]
    async fn list_filters_by_course() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_material_impl(
                "Web Development",
                "HTML Basics",
                None,
                "html.pdf",
                "application/pdf",
                vec![1, 2, 3],
            )
            .await
            .unwrap();
        storage
            .create_material_impl(
                "Data Science",
                "Pandas Notes",
                None,
                "pandas.pdf",
                "application/pdf",
                vec![4, 5],
            )
            .await
            .unwrap();

        let all = storage
            .list_materials_with_pagination_impl(MaterialListQuery {
                page: None,
                size: None,
                course: None,
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);

        let filtered = storage
            .list_materials_with_pagination_impl(MaterialListQuery {
                page: None,
                size: None,
                course: Some("Data Science".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(filtered.pagination.total, 1);
        assert_eq!(filtered.items[0].title, "Pandas Notes");
    }

    #[tokio::test]
    async fn delete_returns_false_for_missing() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let info = storage
            .create_material_impl(
                "Web Development",
                "HTML Basics",
                None,
                "html.pdf",
                "application/pdf",
                vec![1, 2, 3],
            )
            .await
            .unwrap();

        assert!(storage.delete_material_impl(info.id).await.unwrap());
        // 再删同一条返回 false
        assert!(!storage.delete_material_impl(info.id).await.unwrap());
        assert!(
            storage
                .get_material_by_id_impl(info.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
