//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{RoomOccupancy, Student, StudentProfile};

/// Student document as exposed by the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentDto {
    #[serde(rename = "id")]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub age: f64,
    pub gender: String,
    pub current: bool,
    pub awesome: f64,
    pub timestamp: i64,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.as_str().to_string(),
            firstname: student.firstname,
            lastname: student.lastname,
            age: student.age,
            gender: student.gender,
            current: student.current,
            awesome: student.awesome,
            timestamp: student.timestamp.value(),
        }
    }
}

/// `{"students": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentListDto {
    pub students: Vec<StudentDto>,
}

impl From<Vec<Student>> for StudentListDto {
    fn from(students: Vec<Student>) -> Self {
        Self {
            students: students.into_iter().map(StudentDto::from).collect(),
        }
    }
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Form body of `POST /new` and `PUT /update/{time}`
///
/// Numeric fields that fail to parse become `0`; a missing gender becomes `"N/A"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub awesome: Option<String>,
    pub current: Option<String>,
}

fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

impl StudentForm {
    pub fn profile(&self) -> StudentProfile {
        StudentProfile {
            firstname: self.firstname.clone().unwrap_or_default(),
            lastname: self.lastname.clone().unwrap_or_default(),
            age: parse_number(self.age.as_deref()),
            gender: self.gender.clone().unwrap_or_else(|| "N/A".to_string()),
            awesome: parse_number(self.awesome.as_deref()),
        }
    }

    pub fn current(&self) -> bool {
        self.current
            .as_deref()
            .and_then(|v| v.trim().parse::<bool>().ok())
            .unwrap_or(false)
    }
}

/// Live relay room for the rooms endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomOccupancyDto {
    pub room: String,
    pub members: usize,
}

impl From<RoomOccupancy> for RoomOccupancyDto {
    fn from(occupancy: RoomOccupancy) -> Self {
        Self {
            room: occupancy.room.into_string(),
            members: occupancy.members,
        }
    }
}
