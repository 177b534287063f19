//! InMemory Student Repository 実装
//!
//! ドメイン層が定義する StudentRepository trait の具体的な実装。
//! Vec をインメモリのドキュメントストアとして使用します。
//!
//! ## 技術的負債
//!
//! 現在、ドメインモデル（`Student`）を直接ストレージとして使用しています。
//! 外部の DBMS を実装する際は、以下の変換層が必要になります：
//!
//! ```text
//! DB Document → StudentDocument (DTO) → Student (ドメインモデル)
//! ```

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, Student, StudentProfile, StudentRepository, Timestamp};

/// インメモリ Student Repository 実装
///
/// 挿入順を保持し、タイムスタンプ検索は最初に一致したドキュメントを対象とします。
#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: Mutex<Vec<Student>>,
}

impl InMemoryStudentRepository {
    /// 新しい InMemoryStudentRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError> {
        let students = self.students.lock().await;
        Ok(students.clone())
    }

    async fn insert(&self, student: Student) -> Result<(), RepositoryError> {
        let mut students = self.students.lock().await;
        students.push(student);
        Ok(())
    }

    async fn clear_current(&self) -> Result<usize, RepositoryError> {
        let mut students = self.students.lock().await;
        let mut changed = 0;
        for student in students.iter_mut().filter(|s| s.current) {
            student.current = false;
            changed += 1;
        }
        Ok(changed)
    }

    async fn update_by_timestamp(
        &self,
        timestamp: Timestamp,
        profile: StudentProfile,
        current: bool,
    ) -> Result<(), RepositoryError> {
        let mut students = self.students.lock().await;
        let student = students
            .iter_mut()
            .find(|s| s.timestamp == timestamp)
            .ok_or(RepositoryError::StudentNotFound(timestamp.value()))?;
        student.apply(profile, current);
        Ok(())
    }

    async fn remove_by_timestamp(&self, timestamp: Timestamp) -> Result<(), RepositoryError> {
        let mut students = self.students.lock().await;
        let index = students
            .iter()
            .position(|s| s.timestamp == timestamp)
            .ok_or(RepositoryError::StudentNotFound(timestamp.value()))?;
        students.remove(index);
        Ok(())
    }
}
