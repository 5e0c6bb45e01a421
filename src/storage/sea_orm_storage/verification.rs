//! 邮箱验证存储操作
//!
//! 每个邮箱至多一条验证记录，重发覆盖旧码并重置验证状态。

use super::SeaOrmStorage;
use crate::entity::email_verifications::{ActiveModel, Column, Entity as EmailVerifications};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SRSystemError};
use crate::models::verification::entities::VerificationEntry;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 写入验证码，已有记录则覆盖码面、重置时间窗与验证状态
    pub async fn upsert_verification_impl(
        &self,
        email: &str,
        code: &str,
    ) -> Result<VerificationEntry> {
        let now = chrono::Utc::now().timestamp();

        let existing = EmailVerifications::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询验证记录失败: {e}")))?;

        let model = match existing {
            Some(row) => {
                let update = ActiveModel {
                    id: Set(row.id),
                    code: Set(code.to_string()),
                    issued_at: Set(now),
                    verified: Set(false),
                    ..Default::default()
                };
                update
                    .update(&self.db)
                    .await
                    .map_err(|e| SRSystemError::database_operation(format!("覆盖验证码失败: {e}")))?
            }
            None => {
                let insert = ActiveModel {
                    email: Set(email.to_string()),
                    code: Set(code.to_string()),
                    issued_at: Set(now),
                    verified: Set(false),
                    ..Default::default()
                };
                insert
                    .insert(&self.db)
                    .await
                    .map_err(|e| SRSystemError::database_operation(format!("写入验证码失败: {e}")))?
            }
        };

        Ok(model.into_verification_entry())
    }

    /// 通过邮箱获取验证记录
    pub async fn get_verification_by_email_impl(
        &self,
        email: &str,
    ) -> Result<Option<VerificationEntry>> {
        let result = EmailVerifications::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询验证记录失败: {e}")))?;

        Ok(result.map(|row| row.into_verification_entry()))
    }

    /// 标记邮箱已验证
    ///
    /// 验证记录与学生行（若该邮箱已注册）在同一事务内更新，
    /// 返回是否命中验证记录。
    pub async fn mark_email_verified_impl(&self, email: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let entry_result = EmailVerifications::update_many()
            .col_expr(Column::Verified, Expr::value(true))
            .filter(Column::Email.eq(email))
            .exec(&txn)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("更新验证状态失败: {e}")))?;

        // 邮箱尚未注册时学生行更新命中 0 行，属正常情况
        Students::update_many()
            .col_expr(StudentColumn::EmailVerified, Expr::value(true))
            .col_expr(StudentColumn::UpdatedAt, Expr::value(now))
            .filter(StudentColumn::Email.eq(email))
            .exec(&txn)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("更新学生验证状态失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(entry_result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::RegisterStudentRequest;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn upsert_overwrites_existing_entry() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();

        let first = storage
            .upsert_verification_impl("ada@example.com", "111111")
            .await
            .unwrap();
        assert_eq!(first.code, "111111");
        assert!(!first.verified);

        let second = storage
            .upsert_verification_impl("ada@example.com", "222222")
            .await
            .unwrap();
        assert_eq!(second.code, "222222");

        // 同邮箱只保留一条记录
        let count = EmailVerifications::find().count(&storage.db).await.unwrap();
        assert_eq!(count, 1);

        let entry = storage
            .get_verification_by_email_impl("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.code, "222222");
    }

    #[tokio::test]
    async fn mark_verified_flips_entry_and_student() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                RegisterStudentRequest {
                    name: "Ada Lovelace".to_string(),
                    age: 20,
                    email: "ada@example.com".to_string(),
                    phone: None,
                    courses: vec!["Data Science".to_string()],
                },
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();
        storage
            .upsert_verification_impl("ada@example.com", "482913")
            .await
            .unwrap();

        let marked = storage
            .mark_email_verified_impl("ada@example.com")
            .await
            .unwrap();
        assert!(marked);

        let entry = storage
            .get_verification_by_email_impl("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(entry.verified);

        let student = storage
            .get_student_by_student_id_impl("CL100001")
            .await
            .unwrap()
            .unwrap();
        assert!(student.email_verified);
    }

    #[tokio::test]
    async fn mark_verified_without_entry_returns_false() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let marked = storage
            .mark_email_verified_impl("nobody@example.com")
            .await
            .unwrap();
        assert!(!marked);
    }

    #[tokio::test]
    async fn reissue_resets_verified_flag() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .upsert_verification_impl("ada@example.com", "111111")
            .await
            .unwrap();
        storage
            .mark_email_verified_impl("ada@example.com")
            .await
            .unwrap();

        // 重发后回到未验证状态，重新计窗
        let reissued = storage
            .upsert_verification_impl("ada@example.com", "333333")
            .await
            .unwrap();
        assert!(!reissued.verified);
        assert_eq!(reissued.code, "333333");
    }
}
