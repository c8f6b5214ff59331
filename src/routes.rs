//! API endpoints.
//!
//! | Path | Purpose |
//! |---|---|
//! | `/` | Welcome text |
//! | `/scrape/content` | Resolve `option`/`year`/`sub_option`, fetch the portal page, return its table |
//! | `/scrape/content/help` | Valid options and parameters, generated from the catalog |
//! | `/healthz`, `/readyz` | Probes |

use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::catalog::{self, CATEGORIES};
use crate::health;
use crate::http::{IntoResponse, Json, Request, Response, Router};
use crate::params::{QueryParameters, ResolvedParameters};
use crate::portal::Portal;
use crate::scrape::{self, TableContent};

pub const CONTENT_PATH: &str = "/scrape/content";
pub const HELP_PATH: &str = "/scrape/content/help";

/// Shared, read-only state of the running API.
#[derive(Debug)]
pub struct AppState {
    pub portal: Portal,
    pub public_url: String,
    pub pretty_json: bool,
}

impl AppState {
    fn json(&self, status: StatusCode, body: impl Serialize) -> Response {
        Json { status, body, pretty: self.pretty_json }.into_response()
    }
}

/// Builds the router with every endpoint registered.
pub fn app(state: Arc<AppState>) -> Router {
    let content_state = Arc::clone(&state);
    let help_state = state;

    Router::new()
        .get("/", home)
        .get(CONTENT_PATH, move |req| content(Arc::clone(&content_state), req))
        .get(HELP_PATH, move |req| help(Arc::clone(&help_state), req))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

pub async fn home(_req: Request) -> Response {
    Response::text("Welcome to Embrapa's API")
}

#[derive(Serialize)]
struct SearchParameters<'a> {
    option: &'static str,
    year: &'a str,
    sub_option: Option<&'static str>,
}

#[derive(Serialize)]
struct ContentBody<'a> {
    parameters: SearchParameters<'a>,
    source: String,
    #[serde(flatten)]
    table: TableContent,
}

impl<'a> SearchParameters<'a> {
    fn from_resolved(params: &'a ResolvedParameters) -> Self {
        Self {
            option: params.original_option(),
            year: params.original_year(),
            sub_option: params.original_sub_option(),
        }
    }
}

/// `GET /scrape/content`
pub async fn content(state: Arc<AppState>, req: Request) -> Response {
    let params = match QueryParameters::from_query(req.query()).and_then(QueryParameters::resolve) {
        Ok(params) => params,
        Err(e) => {
            debug!(query = req.query(), "rejected parameters: {e}");
            return state.json(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Validation failed",
                    "details": e.to_string(),
                    "support": HELP_PATH,
                    "example": { "option": "producao", "year": 2023 },
                }),
            );
        }
    };

    let source = state.portal.url_for(&params);
    let table = match state.portal.fetch(&params).await.and_then(|page| {
        scrape::extract_table(&page, params.category().layout)
    }) {
        Ok(table) => table,
        Err(e) => {
            warn!(url = %source, "portal scrape failed: {e}");
            return state.json(StatusCode::BAD_GATEWAY, json!({ "error": e.to_string() }));
        }
    };

    state.json(
        StatusCode::OK,
        ContentBody {
            parameters: SearchParameters::from_resolved(&params),
            source,
            table,
        },
    )
}

/// `GET /scrape/content/help`
pub async fn help(state: Arc<AppState>, _req: Request) -> Response {
    let details: Map<String, Value> = CATEGORIES
        .iter()
        .map(|category| {
            let mut parameters = Map::new();
            parameters.insert(
                "year".into(),
                format!("between {} and {}", category.years.first, category.years.last).into(),
            );
            if !category.sub_options.is_empty() {
                parameters.insert("sub_option".into(), json!(category.sub_option_keys()));
            }
            (category.key.to_owned(), json!({ "parameters": parameters }))
        })
        .collect();

    state.json(
        StatusCode::OK,
        json!({
            "help": "This endpoint lists the options and parameters accepted by the API.",
            "example": format!("{}{CONTENT_PATH}?option=producao&year=2000", state.public_url),
            "valid_options": catalog::option_keys(),
            "details": details,
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::http::request::test_request;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            // Nothing listens on port 9; validation tests never reach it.
            portal: Portal::new("http://127.0.0.1:9/index.php", Duration::from_secs(2)),
            public_url: "http://api.test".into(),
            pretty_json: false,
        })
    }

    fn body_json(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn home_greets() {
        let res = home(test_request("/")).await;
        assert_eq!(res.body(), b"Welcome to Embrapa's API");
    }

    #[tokio::test]
    async fn invalid_parameters_are_422() {
        let req = test_request("/scrape/content?option=exportacao&year=2025");
        let res = content(state(), req).await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(&res),
            json!({
                "error": "Validation failed",
                "details": "year must be between 1970 and 2024",
                "support": "/scrape/content/help",
                "example": { "option": "producao", "year": 2023 },
            })
        );
    }

    #[tokio::test]
    async fn unknown_query_key_is_422() {
        let res = content(state(), test_request("/scrape/content?option=producao&ano=2000")).await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(&res)["details"], "unexpected query parameter `ano`");
    }

    #[tokio::test]
    async fn unreachable_portal_is_502() {
        let res = content(state(), test_request("/scrape/content?option=producao")).await;
        assert_eq!(res.status_code(), StatusCode::BAD_GATEWAY);
        assert!(body_json(&res)["error"].is_string());
    }

    #[tokio::test]
    async fn help_is_built_from_catalog() {
        let res = help(state(), test_request(HELP_PATH)).await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let body = body_json(&res);
        assert_eq!(
            body["example"],
            "http://api.test/scrape/content?option=producao&year=2000"
        );
        assert_eq!(
            body["valid_options"],
            json!(["producao", "processamento", "comercializacao", "importacao", "exportacao"])
        );
        assert_eq!(
            body["details"]["producao"],
            json!({ "parameters": { "year": "between 1970 and 2023" } })
        );
        assert_eq!(
            body["details"]["exportacao"]["parameters"],
            json!({
                "year": "between 1970 and 2024",
                "sub_option": ["vinhos_de_mesa", "espumantes", "uvas_frescas", "suco_de_uva"],
            })
        );
    }
}
