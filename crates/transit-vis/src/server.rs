//! Axum web server: drives the session clock and streams snapshots.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};
use transit_graph::Point;
use transit_motion::MotionError;

use crate::error::{Error, Result};
use crate::events::RenderSnapshot;
use crate::interaction::{Interaction, PointerButton, PressOutcome};
use crate::session::Session;

/// Session plus the pointer state of whoever is driving it.
struct World {
    session: Session,
    interaction: Interaction,
}

impl World {
    fn render(&self) -> RenderSnapshot {
        self.interaction.render(&self.session)
    }
}

/// Shared application state.
pub struct AppState {
    world: RwLock<World>,
    frames: watch::Sender<RenderSnapshot>,
}

impl AppState {
    /// Publish the current snapshot to every subscriber.
    fn publish(&self, world: &World) {
        self.frames.send_replace(world.render());
    }
}

/// Sandbox server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server around a session.
    pub fn new(session: Session) -> Self {
        let world = World {
            session,
            interaction: Interaction::new(),
        };
        let (frames, _) = watch::channel(world.render());
        Self {
            state: Arc::new(AppState {
                world: RwLock::new(world),
                frames,
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/api/status", get(status_handler))
            .route("/api/snapshot", get(snapshot_handler))
            .route("/api/cycle", get(cycle_handler))
            .route("/api/press", post(press_handler))
            .route("/api/pointer", post(pointer_handler))
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port, ticking the session in the background.
    pub async fn serve(self, port: u16) -> Result<()> {
        tokio::spawn(run_clock(self.state.clone()));

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Transit sandbox running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Tick the session every frame interval with the measured elapsed time.
async fn run_clock(state: Arc<AppState>) {
    let period = state.world.read().await.session.config().frame_interval;
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        interval.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_secs_f32();
        last = now;

        let mut world = state.world.write().await;
        match world.session.tick(elapsed) {
            Ok(_) => {}
            // Already logged and journalled by the session.
            Err(e) if is_stranding(&e) => debug!("tick reported: {}", e),
            Err(e) => warn!("tick failed: {}", e),
        }
        state.publish(&world);
    }
}

fn is_stranding(e: &Error) -> bool {
    matches!(e, Error::Motion(MotionError::Stranded { .. }))
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Server status response. Also tells the client how to lay out the canvas.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    frame: u64,
    station_count: usize,
    edge_count: usize,
    token_count: usize,
    event_count: usize,
    canvas_width: f32,
    canvas_height: f32,
    node_radius: f32,
    preview_color: String,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let world = state.world.read().await;
    let session = &world.session;
    Json(StatusResponse {
        status: "ok",
        frame: session.frame(),
        station_count: session.graph().station_count(),
        edge_count: session.graph().edge_count(),
        token_count: session.motion().len(),
        event_count: session.event_count(),
        canvas_width: session.config().canvas_width,
        canvas_height: session.config().canvas_height,
        node_radius: session.config().node_radius,
        preview_color: session.config().preview_color.to_css(),
    })
}

async fn snapshot_handler(State(state): State<Arc<AppState>>) -> Json<RenderSnapshot> {
    let world = state.world.read().await;
    Json(world.render())
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct CycleResponse {
    has_cycle: bool,
}

async fn cycle_handler(State(state): State<Arc<AppState>>) -> Json<CycleResponse> {
    let world = state.world.read().await;
    Json(CycleResponse {
        has_cycle: world.session.has_cycle(),
    })
}

#[derive(Debug, Deserialize)]
struct PressRequest {
    button: PointerButton,
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct PointerRequest {
    x: f32,
    y: f32,
}

async fn press_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PressRequest>,
) -> std::result::Result<Json<PressOutcome>, StatusCode> {
    apply_press(&state, req.button, Point::new(req.x, req.y))
        .await
        .map(Json)
        .map_err(|e| {
            warn!("press rejected: {}", e);
            StatusCode::UNPROCESSABLE_ENTITY
        })
}

async fn pointer_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PointerRequest>,
) -> StatusCode {
    apply_pointer(&state, Point::new(req.x, req.y)).await;
    StatusCode::NO_CONTENT
}

async fn apply_press(
    state: &AppState,
    button: PointerButton,
    position: Point,
) -> Result<PressOutcome> {
    let mut world = state.world.write().await;
    let World {
        session,
        interaction,
    } = &mut *world;
    let outcome = interaction.press(session, button, position)?;
    state.publish(&world);
    Ok(outcome)
}

async fn apply_pointer(state: &AppState, position: Point) {
    let mut world = state.world.write().await;
    world.interaction.pointer_moved(position);
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket client connected");
    let mut frames = state.frames.subscribe();

    let initial = frames.borrow_and_update().clone();
    if send(&mut socket, &WsResponse::Snapshot(initial)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match serde_json::from_str::<WsCommand>(&text) {
                            Ok(cmd) => handle_ws_command(&state, cmd).await,
                            Err(e) => {
                                warn!("Unrecognised command: {}", e);
                                Some(WsResponse::Error { message: e.to_string() })
                            }
                        };
                        if let Some(response) = reply {
                            if send(&mut socket, &response).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = frames.borrow_and_update().clone();
                if send(&mut socket, &WsResponse::Snapshot(snapshot)).await.is_err() {
                    break;
                }
            }
        }
    }
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> std::result::Result<(), ()> {
    let json = serde_json::to_string(response).map_err(|e| warn!("Failed to encode: {}", e))?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| debug!("Failed to send: {}", e))
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    Press { button: PointerButton, x: f32, y: f32 },
    Pointer { x: f32, y: f32 },
    GetSnapshot,
    GetCycle,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Snapshot(RenderSnapshot),
    Press { outcome: PressOutcome },
    Cycle { has_cycle: bool },
    Error { message: String },
}

/// Pointer moves are fire-and-forget; everything else gets a reply.
async fn handle_ws_command(state: &AppState, cmd: WsCommand) -> Option<WsResponse> {
    let response = match cmd {
        WsCommand::Press { button, x, y } => {
            match apply_press(state, button, Point::new(x, y)).await {
                Ok(outcome) => WsResponse::Press { outcome },
                Err(e) => {
                    warn!("press rejected: {}", e);
                    WsResponse::Error {
                        message: e.to_string(),
                    }
                }
            }
        }
        WsCommand::Pointer { x, y } => {
            apply_pointer(state, Point::new(x, y)).await;
            return None;
        }
        WsCommand::GetSnapshot => WsResponse::Snapshot(state.world.read().await.render()),
        WsCommand::GetCycle => WsResponse::Cycle {
            has_cycle: state.world.read().await.session.has_cycle(),
        },
    };
    Some(response)
}
