use crate::config::Config;
use crate::credential::Credential;
use crate::error::{self, Error};
use crate::output::{self, FormValues, PageBody};
use crate::planner::{Planner, Query};
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Whether this process can plan at all. Decided once at startup.
pub enum Session {
    Ready(Planner),
    /// Startup failed in a user-visible way (missing key file).
    Unavailable(String),
}

impl Session {
    /// A missing credential yields [`Session::Unavailable`]; any other failure is returned.
    pub fn from_config(config: &Config, key_path: &Path) -> error::Result<Self> {
        match Credential::load(key_path) {
            Ok(credential) => Ok(Self::Ready(Planner::from_config(config, &credential)?)),
            Err(e @ Error::Credential { .. }) => {
                error!("{e}");
                Ok(Self::Unavailable(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn model_label(&self) -> String {
        match self {
            Self::Ready(planner) => {
                format!("{} / {}", planner.llm().provider(), planner.llm().model())
            }
            Self::Unavailable(_) => "no model configured".into(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<Session>,
    model_label: Arc<str>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let model_label = session.model_label().into();
        Self {
            session: Arc::new(session),
            model_label,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct PlanForm {
    #[serde(default)]
    source: String,
    #[serde(default)]
    destination: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/plan", post(plan_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, addr: SocketAddr) -> error::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("travel planner listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let body = match &*state.session {
        Session::Ready(_) => PageBody::Empty,
        Session::Unavailable(message) => PageBody::Unavailable(message.clone()),
    };
    render(&FormValues::default(), body, &state.model_label)
}

async fn plan_handler(
    State(state): State<AppState>,
    Form(form): Form<PlanForm>,
) -> Result<Html<String>, StatusCode> {
    let values = FormValues {
        source: form.source,
        destination: form.destination,
    };

    let body = match &*state.session {
        Session::Unavailable(message) => PageBody::Unavailable(message.clone()),
        Session::Ready(planner) => match Query::new(&values.source, &values.destination) {
            Err(e) => {
                warn!("rejected submission: {e}");
                PageBody::Warning(e.to_string())
            }
            Ok(query) => match planner.plan(&query).await {
                Ok(outcome) => PageBody::Plan(outcome),
                Err(e) => {
                    error!("travel options request failed: {e}");
                    PageBody::Failed(e.to_string())
                }
            },
        },
    };

    render(&values, body, &state.model_label)
}

async fn health_handler() -> &'static str {
    "ok"
}

fn render(
    values: &FormValues,
    body: PageBody,
    model_label: &str,
) -> Result<Html<String>, StatusCode> {
    output::render_page(values, body, model_label)
        .map(Html)
        .map_err(|e| {
            error!("{e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
