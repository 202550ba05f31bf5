use crate::gateway;
use crate::state::AppState;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use draft_core::UserId;
use draft_session::InboundEvent;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub struct Server;

impl Server {
    pub async fn run() -> std::io::Result<()> {
        let state = Arc::new(AppState::new(crate::catalog::bootstrap()));
        tick_timers(state.clone());
        log::info!("starting draft-hosting server");
        let data = web::Data::new(state);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
                .app_data(data.clone())
                .route("/enter", web::get().to(enter))
                .route("/getCollection/{user_id}", web::get().to(get_collection))
                .route("/getUsers/{session_id}", web::get().to(get_users))
                .route("/debug/sessions", web::get().to(debug_sessions))
        })
        .workers(4)
        .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
        .run()
        .await
    }
}

/// Drives the process-wide one-second pick-timer tick. One task for
/// every live session rather than per-session (§5's "single logical
/// executor per session" covers the draft mutation path; the tick
/// itself is cheap enough to share one clock).
fn tick_timers(state: Arc<AppState>) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            let effects = state.registry.lock().unwrap().tick_all_timers();
            if effects.is_empty() {
                continue;
            }
            let registry = state.registry.lock().unwrap();
            let connections = state.connections.lock().unwrap();
            gateway::dispatch_for_tick(&registry, &connections, effects);
        }
    });
}

#[derive(Deserialize)]
struct EnterQuery {
    #[serde(rename = "userName", default)]
    user_name: Option<String>,
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
}

async fn enter(
    state: web::Data<Arc<AppState>>,
    query: web::Query<EnterQuery>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let requested = query.user_id.as_deref().and_then(|s| s.parse::<UserId>().ok());
    let user_name = query.user_name.clone().unwrap_or_else(|| "player".to_string());
    match actix_ws::handle(&req, body) {
        Ok((response, mut session, mut stream)) => {
            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
            let user = gateway::open_connection(&state, requested, user_name, tx);
            let bridge_state = state.into_inner();
            actix_web::rt::spawn(async move {
                'sesh: loop {
                    tokio::select! {
                        biased;
                        msg = rx.recv() => match msg {
                            Some(json) => if session.text(json).await.is_err() { break 'sesh },
                            None => break 'sesh,
                        },
                        msg = stream.next() => match msg {
                            Some(Ok(actix_ws::Message::Text(text))) => {
                                match serde_json::from_str::<InboundEvent>(&text) {
                                    Ok(event) => gateway::handle_event(&bridge_state, user, event),
                                    Err(e) => log::debug!("dropping malformed event from {user}: {e}"),
                                }
                            }
                            Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                            Some(Err(_)) => break 'sesh,
                            None => break 'sesh,
                            _ => continue 'sesh,
                        },
                    }
                }
                gateway::drop_connection(&bridge_state, user);
            });
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()).map_into_right_body(),
    }
}

async fn get_collection(state: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let Ok(user_id) = path.into_inner().parse::<UserId>() else {
        return HttpResponse::BadRequest().body("invalid user id");
    };
    let registry = state.registry.lock().unwrap();
    match registry.participant(user_id) {
        Some(p) => HttpResponse::Ok().json(&p.collection),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn get_users(state: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let Ok(session_id) = path.into_inner().parse() else {
        return HttpResponse::BadRequest().body("invalid session id");
    };
    let registry = state.registry.lock().unwrap();
    match registry.session(session_id) {
        Some(session) => HttpResponse::Ok().json(session.session_users(registry.participants())),
        None => HttpResponse::NotFound().finish(),
    }
}

/// Debug endpoint: a process-wide snapshot, guarded by a static bearer
/// token rather than real auth (out of scope per §1's non-goals).
async fn debug_sessions(state: web::Data<Arc<AppState>>, req: HttpRequest) -> impl Responder {
    let Ok(expected) = std::env::var("DEBUG_SECRET") else {
        return HttpResponse::NotFound().finish();
    };
    let header = req.headers().get("authorization").and_then(|h| h.to_str().ok()).unwrap_or("");
    if header != format!("Bearer {expected}") {
        return HttpResponse::Unauthorized().finish();
    }
    let registry = state.registry.lock().unwrap();
    let summary: Vec<_> = registry
        .public_sessions()
        .into_iter()
        .filter_map(|id| registry.session(id).map(|s| (id.to_string(), s.users.len())))
        .collect();
    HttpResponse::Ok().json(summary)
}
