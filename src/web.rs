use crate::engine::{CorrectionEngine, EngineError};
use crate::review::{
    self, CORRECTION_FIELD_PREFIX, CorrectionSet, SelectedCorrection, apply_corrections, highlight,
};
use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::info;

type SharedState = Arc<AppState>;

pub struct AppState {
    pub engine: Arc<dyn CorrectionEngine>,
    pub theme: WebTheme,
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum WebTheme {
    #[default]
    Tailwind,
    Bootstrap,
}

impl fmt::Display for WebTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebTheme::Tailwind => write!(f, "tailwind"),
            WebTheme::Bootstrap => write!(f, "bootstrap"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Chrome {
    use_tailwind: bool,
    use_bootstrap: bool,
    body_class: &'static str,
    main_class: &'static str,
    card_class: &'static str,
    eyebrow_class: &'static str,
    headline_class: &'static str,
    lede_class: &'static str,
    panel_class: &'static str,
    button_class: &'static str,
    textarea_class: &'static str,
    input_class: &'static str,
    select_class: &'static str,
}

impl Chrome {
    fn new(theme: WebTheme) -> Self {
        match theme {
            WebTheme::Tailwind => Self {
                use_tailwind: true,
                use_bootstrap: false,
                body_class: "bg-slate-50 text-slate-900",
                main_class: "min-h-screen flex flex-col items-center justify-start py-10 px-4",
                card_class: "max-w-3xl w-full space-y-6",
                eyebrow_class: "uppercase tracking-wide text-sm text-slate-500",
                headline_class: "text-4xl font-extrabold tracking-tight",
                lede_class: "text-lg text-slate-600",
                panel_class: "bg-white shadow rounded p-4",
                button_class: "inline-flex items-center rounded-md bg-slate-900 px-4 py-2 text-white font-semibold shadow hover:bg-slate-800 transition-colors",
                textarea_class: "w-full rounded border border-slate-300 p-3 font-mono",
                input_class: "rounded border border-slate-300 px-3 py-2",
                select_class: "rounded border border-slate-300 px-2 py-1",
            },
            WebTheme::Bootstrap => Self {
                use_tailwind: false,
                use_bootstrap: true,
                body_class: "bg-light text-dark",
                main_class: "container py-5",
                card_class: "mx-auto col-lg-8",
                eyebrow_class: "text-uppercase text-muted mb-2",
                headline_class: "display-5 fw-bold",
                lede_class: "lead mb-4",
                panel_class: "card card-body mb-3",
                button_class: "btn btn-primary px-4 py-2",
                textarea_class: "form-control font-monospace",
                input_class: "form-control",
                select_class: "form-select form-select-sm",
            },
        }
    }
}

#[derive(Clone)]
pub struct WebConfig {
    pub addr: SocketAddr,
    pub theme: WebTheme,
    pub base_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            theme: WebTheme::default(),
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum WebError {
    Io(std::io::Error),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<std::io::Error> for WebError {
    fn from(value: std::io::Error) -> Self {
        WebError::Io(value)
    }
}

/// Runs the HTTP front-end until ctrl-c or SIGTERM.
///
/// The engine is an explicitly constructed dependency; its lifecycle is the
/// lifecycle of the process.
pub async fn serve(config: WebConfig, engine: Arc<dyn CorrectionEngine>) -> Result<(), WebError> {
    let state = Arc::new(AppState {
        engine,
        theme: config.theme,
        base_url: config.base_url.clone(),
    });
    let router = build_router(state);
    info!(
        %config.addr,
        theme = ?config.theme,
        base = %config.base_url,
        "Binding HTTP listener"
    );
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/spell", post(spell))
        .route("/apply_corrections", post(apply))
        .route("/search_dictionary", get(search_dictionary))
        .route("/api/spell", post(api_spell))
        .route("/api/suggestions", get(api_suggestions))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CompressionLayer::new())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn engine(err: EngineError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SpellForm {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    word: Option<String>,
}

/// JSON mirror of the rendered editor state.
#[derive(Debug, Clone, Serialize)]
struct SpellPayload {
    original_text: String,
    highlighted_text: Option<String>,
    corrections: CorrectionSet,
    mistake_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct SuggestionsPayload {
    word: String,
    suggestions: Vec<String>,
}

async fn home(State(state): State<SharedState>) -> Response {
    render_editor(state.theme, &state.base_url, EditorPayload::empty())
}

async fn spell(State(state): State<SharedState>, Form(form): Form<SpellForm>) -> Response {
    let text = form.text.unwrap_or_default();
    let check = match state.engine.correct_grammar(&text) {
        Ok(check) => check,
        Err(err) => return engine_error_page(state.theme, err),
    };
    let highlighted = highlight(&text, &check);
    let set = CorrectionSet::from_check(&check);
    let payload = EditorPayload::checked(text, highlighted, &set, check.mistake_count);
    render_editor(state.theme, &state.base_url, payload)
}

async fn apply(
    State(state): State<SharedState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let (original_text, selections) = split_apply_fields(fields);
    let final_text = apply_corrections(&original_text, &selections);
    render_editor(
        state.theme,
        &state.base_url,
        EditorPayload::applied(final_text),
    )
}

async fn search_dictionary(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let word = params.word.unwrap_or_default();
    if word.is_empty() {
        return render_editor(state.theme, &state.base_url, EditorPayload::empty());
    }
    let suggestions = match state.engine.chemistry_suggestions(&word) {
        Ok(suggestions) => suggestions,
        Err(err) => return engine_error_page(state.theme, err),
    };
    let set = CorrectionSet::single(word, suggestions);
    render_editor(state.theme, &state.base_url, EditorPayload::searched(&set))
}

async fn api_spell(
    State(state): State<SharedState>,
    Form(form): Form<SpellForm>,
) -> Result<Json<SpellPayload>, ApiError> {
    let text = form.text.unwrap_or_default();
    let check = state
        .engine
        .correct_grammar(&text)
        .map_err(ApiError::engine)?;
    let highlighted = highlight(&text, &check);
    Ok(Json(SpellPayload {
        highlighted_text: highlighted,
        corrections: CorrectionSet::from_check(&check),
        mistake_count: Some(check.mistake_count),
        original_text: text,
    }))
}

async fn api_suggestions(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SuggestionsPayload>, ApiError> {
    let word = params.word.unwrap_or_default();
    let suggestions = if word.is_empty() {
        Vec::new()
    } else {
        state
            .engine
            .chemistry_suggestions(&word)
            .map_err(ApiError::engine)?
    };
    Ok(Json(SuggestionsPayload { word, suggestions }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "redmark-web" }))
}

/// Splits ordered apply-form fields into the original text and the
/// user-approved selections, both order-preserving.
fn split_apply_fields(fields: Vec<(String, String)>) -> (String, Vec<SelectedCorrection>) {
    let original_text = fields
        .iter()
        .find(|(name, _)| name == "original_text")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    let selections = review::parse_selections(fields);
    (original_text, selections)
}

#[derive(Debug, Clone)]
struct CorrectionRowPayload {
    word: String,
    field_name: String,
    suggestions: Vec<String>,
}

#[derive(Debug, Clone)]
struct DictionaryPayload {
    word: String,
    suggestions: Vec<String>,
    permalink: String,
}

#[derive(Debug, Clone, Default)]
struct EditorPayload {
    original_text: String,
    highlighted_text: Option<String>,
    corrections: Vec<CorrectionRowPayload>,
    mistake_count: Option<usize>,
    dictionary: Option<DictionaryPayload>,
}

impl EditorPayload {
    fn empty() -> Self {
        Self::default()
    }

    fn checked(
        original_text: String,
        highlighted_text: Option<String>,
        set: &CorrectionSet,
        mistake_count: usize,
    ) -> Self {
        Self {
            original_text,
            highlighted_text,
            corrections: correction_rows(set),
            mistake_count: Some(mistake_count),
            dictionary: None,
        }
    }

    // Corrections consumed: set cleared, count cleared, editor holds the result.
    fn applied(final_text: String) -> Self {
        Self {
            original_text: final_text,
            ..Self::default()
        }
    }

    fn searched(set: &CorrectionSet) -> Self {
        let dictionary = set.iter().next().map(|entry| DictionaryPayload {
            word: entry.original.clone(),
            suggestions: entry.suggestions.clone(),
            permalink: search_path(&entry.original),
        });
        Self {
            dictionary,
            ..Self::default()
        }
    }
}

fn correction_rows(set: &CorrectionSet) -> Vec<CorrectionRowPayload> {
    set.iter()
        .map(|entry| CorrectionRowPayload {
            word: entry.original.clone(),
            field_name: format!("{CORRECTION_FIELD_PREFIX}{}", entry.original),
            suggestions: entry.suggestions.clone(),
        })
        .collect()
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn search_path(word: &str) -> String {
    format!("/search_dictionary?word={}", encode_component(word))
}

fn render_editor(theme: WebTheme, base_url: &str, payload: EditorPayload) -> Response {
    let chrome = Chrome::new(theme);
    let template = EditorTemplate {
        chrome,
        payload: &payload,
        base_url,
        version: env!("CARGO_PKG_VERSION"),
    };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_error_page(theme, err.to_string())),
        )
            .into_response(),
    }
}

fn engine_error_page(theme: WebTheme, err: EngineError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render_error_page(theme, err.to_string())),
    )
        .into_response()
}

fn render_error_page(theme: WebTheme, message: impl Into<String>) -> String {
    let chrome = Chrome::new(theme);
    let (css_tag, js_tag) = theme_tags(theme);
    let message = message.into();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Redmark • Error</title>
    {css_tag}
    {js_tag}
  </head>
  <body class="{body_class}">
    <main class="{main_class}">
      <div class="{card_class}">
        <h1 class="{headline_class}">Something went wrong</h1>
        <p class="{lede_class}">{message}</p>
        <a href="/" class="{button_class}">Back to the editor</a>
      </div>
    </main>
  </body>
</html>"#,
        css_tag = css_tag,
        js_tag = js_tag,
        body_class = chrome.body_class,
        main_class = chrome.main_class,
        card_class = chrome.card_class,
        headline_class = chrome.headline_class,
        lede_class = chrome.lede_class,
        button_class = chrome.button_class,
        message = message,
    )
}

fn theme_tags(theme: WebTheme) -> (&'static str, &'static str) {
    match theme {
        WebTheme::Tailwind => (
            r#"<script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>"#,
            "",
        ),
        WebTheme::Bootstrap => (
            r#"<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-sRIl4kxILFvY47J16cr9ZwB07vP4J8+LH7qKQnuqkuIAvNWLzeN8tE5YBujZqJLB" crossorigin="anonymous">"#,
            r#"<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/js/bootstrap.bundle.min.js" integrity="sha384-FKyoEForCGlyvwx9Hj09JcYn3nv7wiPVlz7YYwJrWVcXK/BmnVDxM+D2scQbITxI" crossorigin="anonymous"></script>"#,
        ),
    }
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Redmark • Grammar Review</title>
    {% if chrome.use_tailwind %}
    <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
    {% endif %}
    {% if chrome.use_bootstrap %}
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-sRIl4kxILFvY47J16cr9ZwB07vP4J8+LH7qKQnuqkuIAvNWLzeN8tE5YBujZqJLB" crossorigin="anonymous">
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/js/bootstrap.bundle.min.js" integrity="sha384-FKyoEForCGlyvwx9Hj09JcYn3nv7wiPVlz7YYwJrWVcXK/BmnVDxM+D2scQbITxI" crossorigin="anonymous"></script>
    {% endif %}
    <link rel="canonical" href="{{ base_url }}/">
  </head>
  <body class="{{ chrome.body_class }}">
    <main class="{{ chrome.main_class }}">
      <div class="{{ chrome.card_class }} space-y-6">
        <div>
          <p class="{{ chrome.eyebrow_class }}">Redmark v{{ version }}</p>
          <h1 class="{{ chrome.headline_class }}">Grammar review</h1>
          <p class="{{ chrome.lede_class }}">Paste text, check it, and apply the corrections you agree with.</p>
        </div>

        <section id="editor" class="{{ chrome.panel_class }}">
          <form method="post" action="/spell">
            <textarea name="text" rows="8" class="{{ chrome.textarea_class }}" placeholder="Type or paste text here">{{ payload.original_text }}</textarea>
            <div class="mt-3">
              <button type="submit" class="{{ chrome.button_class }}">Check text</button>
            </div>
          </form>
        </section>

        {% if payload.mistake_count.is_some() %}
        <section id="results">
          {% if payload.mistake_count.unwrap() == 0 %}
          <p class="{{ chrome.lede_class }}">No mistakes found.</p>
          {% else %}
          <p class="{{ chrome.eyebrow_class }}">{{ payload.mistake_count.unwrap() }} flagged span{% if payload.mistake_count.unwrap() != 1 %}s{% endif %}</p>
          {% endif %}
          {% if payload.highlighted_text.is_some() %}
          <div class="{{ chrome.panel_class }} prose prose-slate max-w-none">{{ payload.highlighted_text.as_ref().unwrap()|safe }}</div>
          {% endif %}
          {% if payload.corrections.len() > 0 %}
          <form method="post" action="/apply_corrections" class="mt-4">
            <input type="hidden" name="original_text" value="{{ payload.original_text }}">
            <div class="space-y-2">
              {% for row in payload.corrections %}
              <div class="{{ chrome.panel_class }} flex items-center gap-3 d-flex align-items-center">
                <span class="font-semibold"><del>{{ row.word }}</del></span>
                <select name="{{ row.field_name }}" class="{{ chrome.select_class }}">
                  <option value="">Keep as is</option>
                  {% for suggestion in row.suggestions %}
                  <option value="{{ suggestion }}">{{ suggestion }}</option>
                  {% endfor %}
                </select>
              </div>
              {% endfor %}
            </div>
            <div class="mt-3">
              <button type="submit" class="{{ chrome.button_class }}">Apply selected corrections</button>
            </div>
          </form>
          {% endif %}
        </section>
        {% endif %}

        <section id="dictionary" class="{{ chrome.panel_class }}">
          <h2 class="text-xl font-semibold mb-2">Chemistry dictionary</h2>
          <form method="get" action="/search_dictionary" class="flex gap-2 d-flex">
            <input type="text" name="word" class="{{ chrome.input_class }}" placeholder="e.g. acid">
            <button type="submit" class="{{ chrome.button_class }}">Search</button>
          </form>
          {% if payload.dictionary.is_some() %}
          <div class="mt-3">
            <p class="{{ chrome.eyebrow_class }}">Suggestions for “{{ payload.dictionary.as_ref().unwrap().word }}”</p>
            {% if payload.dictionary.as_ref().unwrap().suggestions.len() == 0 %}
            <p>No suggestions found.</p>
            {% else %}
            <ul class="list-disc pl-6 space-y-1">
              {% for suggestion in payload.dictionary.as_ref().unwrap().suggestions %}
              <li>{{ suggestion }}</li>
              {% endfor %}
            </ul>
            {% endif %}
            <a href="{{ payload.dictionary.as_ref().unwrap().permalink }}" class="text-blue-700 hover:underline">Link to this search</a>
          </div>
          {% endif %}
        </section>
      </div>
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct EditorTemplate<'a> {
    chrome: Chrome,
    payload: &'a EditorPayload,
    base_url: &'a str,
    version: &'static str,
}

#[cfg(all(test, feature = "web"))]
mod tests {
    use super::*;
    use crate::engine::{Correction, GrammarCheck};
    use axum::{body, body::Body, http::Request};
    use tower::ServiceExt;

    /// Fake collaborator with fully scripted behavior.
    struct ScriptedEngine;

    impl CorrectionEngine for ScriptedEngine {
        fn correct_grammar(&self, text: &str) -> Result<GrammarCheck, EngineError> {
            let mut corrections = Vec::new();
            if text.contains("Ths") {
                corrections.push(Correction::new("Ths", vec!["This".to_string()]));
            }
            if text.contains("tst") {
                corrections.push(Correction::new("tst", vec!["test".to_string()]));
            }
            Ok(GrammarCheck {
                mistake_count: corrections.len(),
                corrections,
                real_word_errors: String::new(),
            })
        }

        fn chemistry_suggestions(&self, word: &str) -> Result<Vec<String>, EngineError> {
            if word == "acid" {
                Ok(vec!["acid".to_string(), "acidity".to_string()])
            } else {
                Ok(Vec::new())
            }
        }
    }

    struct FailingEngine;

    impl CorrectionEngine for FailingEngine {
        fn correct_grammar(&self, _text: &str) -> Result<GrammarCheck, EngineError> {
            Err(EngineError::new("model unavailable"))
        }

        fn chemistry_suggestions(&self, _word: &str) -> Result<Vec<String>, EngineError> {
            Err(EngineError::new("model unavailable"))
        }
    }

    fn test_router_with(engine: Arc<dyn CorrectionEngine>) -> Router {
        let state = Arc::new(AppState {
            engine,
            theme: WebTheme::Tailwind,
            base_url: "http://127.0.0.1:8080".to_string(),
        });
        build_router(state)
    }

    fn test_router() -> Router {
        test_router_with(Arc::new(ScriptedEngine))
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(
                axum::http::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_renders_empty_editor() {
        let response = test_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(html.contains("action=\"/spell\""));
        assert!(!html.contains("<section id=\"results\">"));
    }

    #[tokio::test]
    async fn spell_highlights_flagged_spans() {
        let response = test_router()
            .oneshot(form_request("/spell", "text=Ths%20is%20a%20tst"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(html.contains("<del>Ths</del> is a <del>tst</del>"));
        assert!(html.contains("correction_Ths"));
        assert!(html.contains("correction_tst"));
        assert!(html.contains("2 flagged spans"));
    }

    #[tokio::test]
    async fn spell_clean_text_has_no_highlight_panel() {
        let response = test_router()
            .oneshot(form_request("/spell", "text=all%20good"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(html.contains("No mistakes found."));
        assert!(!html.contains("<del>"));
    }

    #[tokio::test]
    async fn spell_with_missing_text_defaults_to_empty() {
        let response = test_router()
            .oneshot(form_request("/spell", ""))
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(html.contains("No mistakes found."));
    }

    #[tokio::test]
    async fn apply_corrections_merges_selected_replacements() {
        let response = test_router()
            .oneshot(form_request(
                "/apply_corrections",
                "original_text=Ths%20is%20a%20tst&correction_Ths=This&correction_tst=test",
            ))
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(html.contains("This is a test"));
        assert!(!html.contains("<section id=\"results\">"));
    }

    #[tokio::test]
    async fn search_dictionary_lists_engine_suggestions() {
        let response = test_router()
            .oneshot(
                Request::get("/search_dictionary?word=acid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(html.contains("acidity"));
        assert!(html.contains("/search_dictionary?word=acid"));
    }

    #[tokio::test]
    async fn search_dictionary_empty_word_is_a_no_op() {
        let response = test_router()
            .oneshot(
                Request::get("/search_dictionary?word=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
        let html = body_text(response).await;
        assert!(!html.contains("Suggestions for"));
    }

    #[tokio::test]
    async fn api_spell_returns_json_payload() {
        let response = test_router()
            .oneshot(form_request("/api/spell", "text=Ths%20is%20a%20tst"))
            .await
            .unwrap();
        assert!(response.status().is_success());
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["original_text"], "Ths is a tst");
        assert_eq!(payload["mistake_count"], 2);
        assert_eq!(
            payload["highlighted_text"],
            "<del>Ths</del> is a <del>tst</del>"
        );
    }

    #[tokio::test]
    async fn api_suggestions_for_acid() {
        let response = test_router()
            .oneshot(
                Request::get("/api/suggestions?word=acid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["word"], "acid");
        assert_eq!(payload["suggestions"][0], "acid");
    }

    #[tokio::test]
    async fn engine_failure_surfaces_as_server_error() {
        let response = test_router_with(Arc::new(FailingEngine))
            .oneshot(form_request("/spell", "text=anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let response = test_router()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());
    }
}
