//! UseCase: 学生削除

use std::sync::Arc;

use crate::domain::{StudentRepository, Timestamp};

use super::error::StudentUseCaseError;

/// 学生削除のユースケース
pub struct DeleteStudentUseCase {
    repository: Arc<dyn StudentRepository>,
}

impl DeleteStudentUseCase {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, timestamp: Timestamp) -> Result<(), StudentUseCaseError> {
        self.repository.remove_by_timestamp(timestamp).await?;
        Ok(())
    }
}
