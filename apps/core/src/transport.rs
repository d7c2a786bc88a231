use serde::{Deserialize, Serialize};

use crate::contract::{
    CommitResponse, LauncherRequest, LauncherResponse, RankedResultDto, ResultsResponse,
};
use crate::controller::{Invoker, LauncherController};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: LauncherResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(
    controller: &mut LauncherController,
    invoker: &mut dyn Invoker,
    request: LauncherRequest,
) -> LauncherResponse {
    match request {
        LauncherRequest::SetQuery(request) => {
            controller.set_query(&request.text);
            results_response(controller)
        }
        LauncherRequest::MoveCursor(request) => {
            controller.move_cursor(request.direction.into());
            results_response(controller)
        }
        LauncherRequest::Commit => {
            let commit = controller.commit(invoker);
            LauncherResponse::Commit(CommitResponse {
                committed: commit.as_ref().map(|c| c.entry_path.clone()),
                invoke_error: commit
                    .and_then(|c| c.invoke_error)
                    .map(|error| error.to_string()),
            })
        }
        LauncherRequest::Cancel => {
            controller.cancel();
            LauncherResponse::Closed
        }
    }
}

pub fn handle_json(
    controller: &mut LauncherController,
    invoker: &mut dyn Invoker,
    payload: &str,
) -> String {
    let response = match serde_json::from_str::<LauncherRequest>(payload) {
        Ok(request) => TransportResponse::Ok {
            response: handle_request(controller, invoker, request),
        },
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}

fn results_response(controller: &LauncherController) -> LauncherResponse {
    LauncherResponse::Results(ResultsResponse {
        results: controller
            .results()
            .iter()
            .map(RankedResultDto::from)
            .collect(),
        cursor: controller.cursor_position(),
    })
}
