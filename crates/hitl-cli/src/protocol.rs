//! Line-delimited JSON protocol over the review coordinator
//!
//! One request object per line, tagged by `op`; one response line per
//! request: `{"ok": ...}` or `{"error": {"kind": ..., "message": ...}}`.

use hitl_coordination::{CoordinatorError, Label, ReviewCoordinator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// A protocol request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Classify {
        text: String,
    },
    GetTask {
        task_id: String,
    },
    SubmitLabel {
        task_id: String,
        /// Parsed by the coordinator's vocabulary so unknown labels surface
        /// as validation errors rather than protocol errors
        label: String,
        #[serde(default)]
        worker_id: Option<String>,
    },
    ListTasks,
    ListPending,
}

/// Category of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Validation,
    Model,
    Store,
    Config,
    Protocol,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// A protocol response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(Value),
    Error(ErrorBody),
}

impl Response {
    fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Response::Error(ErrorBody {
            kind,
            message: message.into(),
        })
    }
}

impl From<CoordinatorError> for Response {
    fn from(err: CoordinatorError) -> Self {
        let kind = match &err {
            CoordinatorError::TaskNotFound(_) => ErrorKind::NotFound,
            CoordinatorError::Validation(_) => ErrorKind::Validation,
            CoordinatorError::Model(_) => ErrorKind::Model,
            CoordinatorError::Store(_) => ErrorKind::Store,
            CoordinatorError::Config(_) => ErrorKind::Config,
        };
        Response::error(kind, err.to_string())
    }
}

/// Execute a parsed request
pub async fn dispatch(coordinator: &ReviewCoordinator, request: Request) -> Response {
    match execute(coordinator, request).await {
        Ok(response) => response,
        Err(e) => e.into(),
    }
}

async fn execute(
    coordinator: &ReviewCoordinator,
    request: Request,
) -> Result<Response, CoordinatorError> {
    let response = match request {
        Request::Classify { text } => ok(coordinator.classify(&text).await?),
        Request::GetTask { task_id } => ok(coordinator.get_task(&task_id)?),
        Request::SubmitLabel {
            task_id,
            label,
            worker_id,
        } => {
            let label: Label = label.parse()?;
            ok(coordinator.submit_label(&task_id, label, worker_id)?)
        }
        Request::ListTasks => ok(coordinator.list_tasks()?),
        Request::ListPending => ok(coordinator.list_pending()?),
    };
    Ok(response)
}

fn ok(payload: impl Serialize) -> Response {
    match serde_json::to_value(payload) {
        Ok(value) => Response::Ok(value),
        Err(e) => Response::error(ErrorKind::Protocol, e.to_string()),
    }
}

/// Parse and execute one protocol line
pub async fn handle_line(coordinator: &ReviewCoordinator, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed request: {}", e);
            return Response::error(ErrorKind::Protocol, e.to_string());
        }
    };

    debug!(?request, "Dispatching request");
    dispatch(coordinator, request).await
}

/// Serve requests from `reader` until EOF, writing one response per line
///
/// Blank lines are skipped. Returns the number of requests handled.
pub async fn serve<R, W>(
    coordinator: &ReviewCoordinator,
    reader: R,
    mut writer: W,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(coordinator, &line).await;
        let mut out = serde_json::to_vec(&response).map_err(std::io::Error::other)?;
        out.push(b'\n');

        writer.write_all(&out).await?;
        writer.flush().await?;
        handled += 1;
    }

    Ok(handled)
}
