//! UseCase: 学生登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterStudentUseCase::execute() メソッド
//! - 既存学生の current 解除 → 新規学生の挿入、の順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規登録された学生だけが current になる
//! - 異常系：current 解除に失敗した場合は挿入しない

use std::sync::Arc;

use studyhall_shared::time::get_unix_timestamp;

use crate::domain::{Student, StudentIdFactory, StudentProfile, StudentRepository, Timestamp};

use super::error::StudentUseCaseError;

/// 学生登録のユースケース
pub struct RegisterStudentUseCase {
    repository: Arc<dyn StudentRepository>,
}

impl RegisterStudentUseCase {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    /// 学生登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Student)` - 登録された学生（current = true）
    /// * `Err(StudentUseCaseError)` - ストアの障害
    pub async fn execute(&self, profile: StudentProfile) -> Result<Student, StudentUseCaseError> {
        // 1. 既存の学生を全て current = false にする
        let cleared = self.repository.clear_current().await?;
        tracing::debug!(cleared, "Cleared current flag");

        // 2. 新しい学生を current = true で追加
        let student = Student::enroll(
            StudentIdFactory::generate(),
            profile,
            Timestamp::new(get_unix_timestamp()),
        );
        self.repository.insert(student.clone()).await?;

        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockStudentRepository},
        infrastructure::repository::InMemoryStudentRepository,
    };
    use mockall::Sequence;

    fn profile(firstname: &str) -> StudentProfile {
        StudentProfile {
            firstname: firstname.to_string(),
            lastname: "Turing".to_string(),
            age: 41.0,
            gender: "M".to_string(),
            awesome: 10.0,
        }
    }

    #[tokio::test]
    async fn test_register_clears_current_before_insert() {
        // テスト項目: current 解除の後に current = true の学生が挿入される
        // given (前提条件):
        let mut repository = MockStudentRepository::new();
        let mut seq = Sequence::new();
        repository
            .expect_clear_current()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(1));
        repository
            .expect_insert()
            .withf(|student: &Student| student.current && student.firstname == "Alan")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let usecase = RegisterStudentUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(profile("Alan")).await;

        // then (期待する結果):
        let student = result.unwrap();
        assert!(student.current);
        assert!(student.timestamp.value() > 0);
    }

    #[tokio::test]
    async fn test_register_does_not_insert_when_clear_fails() {
        // テスト項目: current 解除に失敗した場合は挿入されない
        // given (前提条件):
        let mut repository = MockStudentRepository::new();
        repository
            .expect_clear_current()
            .returning(|| Err(RepositoryError::Unavailable("offline".to_string())));
        repository.expect_insert().never();
        let usecase = RegisterStudentUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(profile("Alan")).await;

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_only_latest_student_is_current() {
        // テスト項目: 二人目を登録すると一人目の current は解除される
        // given (前提条件):
        let repository = Arc::new(InMemoryStudentRepository::new());
        let usecase = RegisterStudentUseCase::new(repository.clone());

        // when (操作):
        usecase.execute(profile("Alan")).await.unwrap();
        usecase.execute(profile("Alonzo")).await.unwrap();

        // then (期待する結果):
        let all = repository.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(!all[0].current);
        assert!(all[1].current);
        assert_eq!(all[1].firstname, "Alonzo");
    }
}
