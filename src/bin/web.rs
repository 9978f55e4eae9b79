use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use electron_cloud::scene::build_scene;
use electron_cloud::{init_logging, AppConfig, SimulationState};
use log::{error, info};
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[derive(Clone)]
struct AppState {
    sim: Arc<Mutex<SimulationState>>,
    config: Arc<AppConfig>,
}

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Electron Cloud</title>
    <style>
      html, body { margin: 0; padding: 0; height: 100%; background: #000; color: #e6e6e6; font-family: "Segoe UI", sans-serif; }
      canvas { display: block; margin: 0 auto; background: #000; }
      #status { position: absolute; top: 8px; left: 12px; font-size: 12px; opacity: 0.6; }
    </style>
  </head>
  <body>
    <div id="status">connecting...</div>
    <canvas id="view"></canvas>
    <script>
      const canvas = document.getElementById("view");
      const ctx = canvas.getContext("2d");
      const status = document.getElementById("status");

      function css([r, g, b, a]) {
        return `rgba(${Math.round(r * 255)}, ${Math.round(g * 255)}, ${Math.round(b * 255)}, ${a})`;
      }

      function draw(scene) {
        if (canvas.width !== scene.width || canvas.height !== scene.height) {
          canvas.width = scene.width;
          canvas.height = scene.height;
        }
        ctx.fillStyle = "#000";
        ctx.fillRect(0, 0, canvas.width, canvas.height);
        for (const d of scene.discs) {
          ctx.fillStyle = css(d.color);
          ctx.beginPath();
          ctx.arc(d.center[0], d.center[1], d.radius, 0, 2 * Math.PI);
          ctx.fill();
        }
        ctx.font = "18px sans-serif";
        ctx.textBaseline = "top";
        for (const l of scene.labels) {
          ctx.fillStyle = css(l.color);
          ctx.fillText(l.text, l.position[0], l.position[1]);
        }
        status.textContent = `frame ${scene.frame}`;
      }

      async function loop() {
        try {
          const res = await fetch("/frame");
          if (res.ok) {
            draw(await res.json());
          } else {
            status.textContent = `server error ${res.status}`;
          }
        } catch (e) {
          status.textContent = "disconnected";
        }
        requestAnimationFrame(loop);
      }

      requestAnimationFrame(loop);
    </script>
  </body>
</html>
"##;

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

fn lock_error() -> axum::response::Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "simulation state poisoned").into_response()
}

async fn frame(State(app): State<AppState>) -> impl IntoResponse {
    let snapshot = match app.sim.lock() {
        Ok(sim) => sim.snapshot(),
        Err(_) => return lock_error(),
    };
    Json(build_scene(&snapshot)).into_response()
}

async fn snapshot(State(app): State<AppState>) -> impl IntoResponse {
    match app.sim.lock() {
        Ok(sim) => Json(sim.snapshot()).into_response(),
        Err(_) => lock_error(),
    }
}

async fn active_config(State(app): State<AppState>) -> impl IntoResponse {
    Json(app.config.as_ref().clone())
}

/// Advance the simulation once per frame until the state is poisoned.
async fn run_ticker(sim: Arc<Mutex<SimulationState>>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let Ok(mut state) = sim.lock() else {
            error!("simulation state poisoned; ticker stopping");
            break;
        };
        state.tick();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let config = AppConfig::from_args_or_env()?;
    let sim = Arc::new(Mutex::new(SimulationState::new(&config)?));
    let ticker = tokio::spawn(run_ticker(sim.clone(), config.frame_interval()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        sim,
        config: Arc::new(config),
    };
    let app = Router::new()
        .route("/", get(index))
        .route("/frame", get(frame))
        .route("/snapshot", get(snapshot))
        .route("/config", get(active_config))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("serving on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ticker.abort();
    Ok(())
}
