use serde::{Deserialize, Serialize};

use crate::cursor::MoveDirection;
use crate::model::RankedResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetQueryRequest {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DirectionDto {
    First,
    Up,
    Down,
}

impl From<DirectionDto> for MoveDirection {
    fn from(value: DirectionDto) -> Self {
        match value {
            DirectionDto::First => MoveDirection::First,
            DirectionDto::Up => MoveDirection::Up,
            DirectionDto::Down => MoveDirection::Down,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveCursorRequest {
    pub direction: DirectionDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResultDto {
    pub path: String,
    pub label: String,
    pub score: f64,
}

impl From<&RankedResult> for RankedResultDto {
    fn from(value: &RankedResult) -> Self {
        Self {
            path: value.entry.path().to_string(),
            label: value.entry.label().to_string(),
            score: value.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultsResponse {
    pub results: Vec<RankedResultDto>,
    pub cursor: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitResponse {
    pub committed: Option<String>,
    pub invoke_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload")]
pub enum LauncherRequest {
    SetQuery(SetQueryRequest),
    MoveCursor(MoveCursorRequest),
    Commit,
    Cancel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload")]
pub enum LauncherResponse {
    Results(ResultsResponse),
    Commit(CommitResponse),
    Closed,
}
