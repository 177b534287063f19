//! UseCase: 学生情報更新

use std::sync::Arc;

use crate::domain::{StudentProfile, StudentRepository, Timestamp};

use super::error::StudentUseCaseError;

/// 学生情報更新のユースケース
pub struct UpdateStudentUseCase {
    repository: Arc<dyn StudentRepository>,
}

impl UpdateStudentUseCase {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    /// `timestamp` に作成された学生の編集可能な項目を上書きする
    pub async fn execute(
        &self,
        timestamp: Timestamp,
        profile: StudentProfile,
        current: bool,
    ) -> Result<(), StudentUseCaseError> {
        self.repository
            .update_by_timestamp(timestamp, profile, current)
            .await?;
        Ok(())
    }
}
