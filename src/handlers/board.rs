use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};

use crate::app_state::AppState;
use crate::models::{BoardResponse, MoveRequest, MoveResponse};
use crate::services::board_service::{MoveOutcome, MoveTicket};

use super::upstream_error;

/// GET /api/v1/board
#[utoipa::path(
    get,
    path = "/api/v1/board",
    responses(
        (status = 200, description = "Current department columns", body = BoardResponse),
        (status = 502, description = "Report store unavailable")
    )
)]
pub async fn get_board(
    State(state): State<AppState>,
) -> Result<Json<BoardResponse>, (StatusCode, String)> {
    ensure_loaded(&state).await.map_err(upstream_error)?;
    let board = state.board.read().await;
    Ok(Json(BoardResponse {
        columns: board.columns().to_vec(),
    }))
}

/// POST /api/v1/board/move
///
/// Applies the optimistic local move and responds immediately; the
/// reassignment is persisted to the report store in the background. A drop
/// that resolves to no target, or to the card's current column, changes
/// nothing.
#[utoipa::path(
    post,
    path = "/api/v1/board/move",
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Move outcome", body = MoveResponse),
        (status = 502, description = "Report store unavailable")
    )
)]
pub async fn move_report(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, (StatusCode, String)> {
    ensure_loaded(&state).await.map_err(upstream_error)?;

    let ticket = {
        let mut board = state.board.write().await;

        let target = match board.resolve_drop_target(&req.released_over_id, &state.departments) {
            Some(target) => target,
            None => return Ok(Json(not_moved())),
        };
        let from = match board.column_of(&req.active_id) {
            Some(from) => from.to_string(),
            None => return Ok(Json(not_moved())),
        };

        match board.move_report(&req.active_id, &from, &target) {
            Ok(Some(ticket)) => ticket,
            Ok(None) => return Ok(Json(not_moved())),
            Err(e) => {
                tracing::error!("rejected move of {}: {}", req.active_id, e);
                return Err((StatusCode::CONFLICT, e.to_string()));
            }
        }
    };

    let department = ticket.department.clone();
    tracing::info!(
        move_id = %ticket.id,
        report_id = %ticket.report_id,
        department = %department,
        "optimistically reassigned"
    );

    let background = state.clone();
    tokio::spawn(async move {
        persist_move(background, ticket).await;
    });

    Ok(Json(MoveResponse {
        moved: true,
        department: Some(department),
    }))
}

/// POST /api/v1/board/refresh
#[utoipa::path(
    post,
    path = "/api/v1/board/refresh",
    responses(
        (status = 200, description = "Columns rebuilt from the report store", body = BoardResponse),
        (status = 502, description = "Report store unavailable")
    )
)]
pub async fn refresh_board(
    State(state): State<AppState>,
) -> Result<Json<BoardResponse>, (StatusCode, String)> {
    resync(&state).await.map_err(upstream_error)?;
    let board = state.board.read().await;
    Ok(Json(BoardResponse {
        columns: board.columns().to_vec(),
    }))
}

fn not_moved() -> MoveResponse {
    MoveResponse {
        moved: false,
        department: None,
    }
}

async fn ensure_loaded(state: &AppState) -> anyhow::Result<()> {
    {
        let board = state.board.read().await;
        if board.is_loaded() {
            return Ok(());
        }
    }
    resync(state).await
}

async fn resync(state: &AppState) -> anyhow::Result<()> {
    let reports = state.upstream.fetch_reports().await?;
    let mut board = state.board.write().await;
    board.replace(&reports, &state.departments);
    Ok(())
}

async fn persist_move(state: AppState, ticket: MoveTicket) {
    let persisted = match state
        .upstream
        .assign_department(&ticket.report_id, &ticket.department)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                move_id = %ticket.id,
                report_id = %ticket.report_id,
                "failed to persist reassignment: {:#}",
                e
            );
            false
        }
    };

    let outcome = {
        let mut board = state.board.write().await;
        board.complete_move(&ticket, persisted)
    };

    match outcome {
        MoveOutcome::Applied => {
            tracing::info!(move_id = %ticket.id, "reassignment confirmed");
        }
        MoveOutcome::Superseded => {
            tracing::debug!(move_id = %ticket.id, "stale reassignment result ignored");
        }
        MoveOutcome::NeedsResync => {
            // The optimistic move is not authoritative on error; rebuild
            // from the store.
            if let Err(e) = resync(&state).await {
                tracing::error!("board resync after failed move also failed: {:#}", e);
            }
        }
    }
}
