//! 邮箱验证实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "email_verifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub code: String,
    pub issued_at: i64,
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_verification_entry(
        self,
    ) -> crate::models::verification::entities::VerificationEntry {
        use crate::models::verification::entities::VerificationEntry;
        use chrono::{DateTime, Utc};

        VerificationEntry {
            email: self.email,
            code: self.code,
            issued_at: DateTime::<Utc>::from_timestamp(self.issued_at, 0).unwrap_or_default(),
            verified: self.verified,
        }
    }
}
