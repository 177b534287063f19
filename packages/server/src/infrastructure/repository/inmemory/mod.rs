//! In-memory repository implementations.

pub mod student;

pub use student::InMemoryStudentRepository;
