use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// A registered student or lecturer.
///
/// `unique_id` is the school-assigned identifier carried in submissions;
/// `card_uid` is the identity card the edge device reads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub unique_id: String,
    pub card_uid: String,
    pub full_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Course {
    pub code: String,
    pub title: String,
}
