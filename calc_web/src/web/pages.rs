//! HTML form page.

use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use tracing::{debug, error, info};

use calc_core::calculations::cords_total;
use calc_core::{calculate, Catalog, CordLength};

use super::AppState;
use crate::form::{BraidForm, FieldError, FORM_ERROR_MESSAGE};

/// One entry of the braid select.
struct BraidOption {
    name: String,
    selected: bool,
}

/// One row of the results table.
struct CordRow {
    label: String,
    length_cm: String,
    length_ft: String,
    url: String,
}

impl CordRow {
    fn new(index: usize, cord: &CordLength) -> Self {
        Self {
            label: cord
                .name
                .clone()
                .unwrap_or_else(|| format!("Cord {}", index + 1)),
            length_cm: format!("{:.2}", cord.length_cm),
            length_ft: format!("{:.2}", cord.length_ft()),
            url: cord.url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    braids: Vec<BraidOption>,
    wrist: String,
    cord_count: String,
    flash: String,
    wrist_error: String,
    knot_error: String,
    cord_count_error: String,
    results: Vec<CordRow>,
    total_cm: String,
}

impl IndexTemplate {
    fn new(catalog: &Catalog, form: &BraidForm) -> Self {
        let braids = catalog
            .names()
            .into_iter()
            .map(|name| BraidOption {
                name: name.to_string(),
                selected: name == form.knot,
            })
            .collect();

        Self {
            braids,
            wrist: form.wrist.clone(),
            cord_count: form.cord_count.clone(),
            flash: String::new(),
            wrist_error: String::new(),
            knot_error: String::new(),
            cord_count_error: String::new(),
            results: Vec::new(),
            total_cm: String::new(),
        }
    }

    fn with_errors(mut self, errors: &[FieldError]) -> Self {
        self.flash = FORM_ERROR_MESSAGE.to_string();
        for err in errors {
            let slot = match err.field {
                "wrist" => &mut self.wrist_error,
                "knot" => &mut self.knot_error,
                _ => &mut self.cord_count_error,
            };
            *slot = err.message.clone();
        }
        self
    }

    fn with_results(mut self, cords: &[CordLength]) -> Self {
        self.total_cm = format!("{:.2}", cords_total(cords).value());
        self.results = cords
            .iter()
            .enumerate()
            .map(|(i, cord)| CordRow::new(i, cord))
            .collect();
        self
    }
}

fn render(template: &IndexTemplate) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render form page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// GET / - Empty form.
pub(super) async fn show_form(State(state): State<AppState>) -> Response {
    render(&IndexTemplate::new(state.catalog(), &BraidForm::default()))
}

/// POST / - Validate the form and show the cord lengths.
pub(super) async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<BraidForm>, FormRejection>,
) -> Response {
    let catalog = state.catalog();

    let form = match form {
        Ok(Form(form)) => form,
        // Treated as an empty submission
        Err(rejection) => {
            info!("Unreadable braid form: {}", rejection.body_text());
            BraidForm::default()
        }
    };
    let page = IndexTemplate::new(catalog, &form);

    let request = match form.validate(catalog) {
        Ok(request) => request,
        Err(errors) => {
            info!("Rejected braid form with {} invalid field(s)", errors.len());
            return render(&page.with_errors(&errors));
        }
    };

    let cords = calculate(catalog, request.wrist_cm, &request.braid_name, request.cord_count);
    debug!(
        "Calculated {} cords for '{}' at {} cm",
        cords.len(),
        request.braid_name,
        request.wrist_cm
    );

    render(&page.with_results(&cords))
}
