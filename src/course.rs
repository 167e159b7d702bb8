//! Course data model
//!
//! These types document the JSON shape the provider is instructed to emit
//! (camelCase keys, matching the schema text in [`crate::pipeline::prompt`]).
//! The generation pipeline does not validate parsed output against them;
//! any JSON the provider returns is accepted as a course. They exist for
//! consumers of the API and for tests, not as a runtime gate.

use serde::{Deserialize, Serialize};

/// A generated course outline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_title: String,
    pub modules: Vec<Module>,
}

/// One module of a course
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub module_title: String,
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

/// One lesson within a module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub lesson_title: String,
    pub content: String,
    /// Free text, e.g. "30 minutes"
    pub duration: String,
}

/// A multiple-choice quiz question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub question: String,
    /// Four options, labeled A through D by position
    pub options: Vec<String>,
    /// One of "A".."D"
    pub correct_answer: String,
    pub explanation: String,
}
