//! Student record endpoints.
//!
//! Write endpoints answer with their fixed success body even when the store
//! reports a failure; the failure is logged.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::Timestamp,
    infrastructure::dto::http::{MessageDto, StudentForm, StudentListDto},
    ui::state::AppState,
    usecase::{
        DeleteStudentUseCase, ListStudentsUseCase, RegisterStudentUseCase, UpdateStudentUseCase,
    },
};

/// Parse the `{time}` path segment. Non-numeric input maps to 0.
fn parse_timestamp(raw: &str) -> Timestamp {
    match raw.trim().parse::<i64>() {
        Ok(value) => Timestamp::new(value),
        Err(_) => {
            tracing::warn!("Invalid timestamp in path: '{}'", raw);
            Timestamp::new(0)
        }
    }
}

async fn all_students(state: &AppState) -> Result<Json<StudentListDto>, StatusCode> {
    let usecase = ListStudentsUseCase::new(state.students.clone());
    match usecase.execute().await {
        Ok(students) => Ok(Json(StudentListDto::from(students))),
        Err(e) => {
            tracing::error!("Failed to list students: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `GET /all`
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StudentListDto>, StatusCode> {
    all_students(&state).await
}

/// `POST /new`
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StudentForm>,
) -> Json<MessageDto> {
    let usecase = RegisterStudentUseCase::new(state.students.clone());
    match usecase.execute(form.profile()).await {
        Ok(student) => tracing::info!(
            student_id = %student.id,
            timestamp = %student.timestamp,
            "Registered student"
        ),
        Err(e) => tracing::error!("Failed to register student: {}", e),
    }
    Json(MessageDto::new("Posted"))
}

/// `DELETE /delete/{time}`
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(time): Path<String>,
) -> Json<MessageDto> {
    let timestamp = parse_timestamp(&time);
    let usecase = DeleteStudentUseCase::new(state.students.clone());
    if let Err(e) = usecase.execute(timestamp).await {
        tracing::warn!("Failed to delete student: {}", e);
    }
    Json(MessageDto::new("Deleted"))
}

/// `PUT /update/{time}`; responds with every student after the update
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(time): Path<String>,
    Form(form): Form<StudentForm>,
) -> Result<Json<StudentListDto>, StatusCode> {
    let timestamp = parse_timestamp(&time);
    let usecase = UpdateStudentUseCase::new(state.students.clone());
    if let Err(e) = usecase
        .execute(timestamp, form.profile(), form.current())
        .await
    {
        tracing::warn!("Failed to update student: {}", e);
    }
    all_students(&state).await
}
