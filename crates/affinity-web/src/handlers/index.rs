//! Landing page with the prediction form.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use tracing::error;

use affinity_chem::{DESCRIPTOR_LENGTH, DESCRIPTOR_RADIUS};

use crate::state::{ModelStatus, SharedState};

const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub async fn index(State(state): State<SharedState>) -> Response {
    match render_index(&state.model, &state.chem.name()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Landing page template failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

fn render_index(model: &ModelStatus, toolkit: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_HTML)?;

    let (model_loaded, model_kind, model_error) = match model {
        ModelStatus::Loaded { model, .. } => (true, Some(model.kind().to_string()), None),
        ModelStatus::Unavailable(reason) => (false, None, Some(reason.clone())),
    };

    let template = env.get_template("index.html")?;
    let html = template.render(context! {
        model_loaded,
        model_kind,
        model_error,
        toolkit,
        radius => DESCRIPTOR_RADIUS,
        fp_size => DESCRIPTOR_LENGTH,
    })?;
    Ok(html)
}
