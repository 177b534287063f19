//! UseCase: 学生一覧取得

use std::sync::Arc;

use crate::domain::{Student, StudentRepository};

use super::error::StudentUseCaseError;

/// 学生一覧取得のユースケース
pub struct ListStudentsUseCase {
    repository: Arc<dyn StudentRepository>,
}

impl ListStudentsUseCase {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Student>, StudentUseCaseError> {
        Ok(self.repository.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RepositoryError, repository::MockStudentRepository};

    #[tokio::test]
    async fn test_list_students_propagates_store_failure() {
        // テスト項目: ストアの障害はユースケースのエラーとして返される
        // given (前提条件):
        let mut repository = MockStudentRepository::new();
        repository
            .expect_find_all()
            .times(1)
            .returning(|| Err(RepositoryError::Unavailable("offline".to_string())));
        let usecase = ListStudentsUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(StudentUseCaseError::Repository(RepositoryError::Unavailable(
                "offline".to_string()
            )))
        );
    }
}
