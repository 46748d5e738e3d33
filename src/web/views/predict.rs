use maud::{html, Markup, DOCTYPE};
use poem::http::StatusCode;
use poem::web::{Data, Form, Html};
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::web::form::PredictForm;
use crate::web::partials::{
    footer, headers, model_unavailable, navbar, predict_form, risk_result, validation_error,
};
use crate::web::state::ModelState;

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get() -> Html<String> {
    Html(page(None).into_string())
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post(Form(form): Form<PredictForm>, Data(state): Data<&ModelState>) -> Response {
    let model = match state {
        ModelState::Ready(model) => model,
        ModelState::Unavailable => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(page(Some(model_unavailable())).into_string()),
            )
                .into_response();
        }
    };
    match form.parse() {
        Ok(record) => {
            let prediction = model.predict(&record);
            info!(?record, prediction);
            Html(page(Some(risk_result(prediction))).into_string()).into_response()
        }
        Err(violation) => {
            info!(field = violation.field, message = violation.message.as_str(), "rejected");
            (
                StatusCode::BAD_REQUEST,
                Html(page(Some(validation_error(&violation))).into_string()),
            )
                .into_response()
        }
    }
}

/// The predict page: the form plus an optional outcome block, either a result,
/// a validation error or the unavailability notice.
fn page(outcome: Option<Markup>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Risk calculator – SafeRoad" }
            }
            body {
                (navbar())
                section.section {
                    div.container {
                        div.columns.is-centered {
                            div.column."is-8" {
                                h1.title { "Risk calculator" }
                                p.subtitle {
                                    "Describe the road scenario; every field is required."
                                }
                                @if let Some(outcome) = outcome {
                                    (outcome)
                                }
                                div.box {
                                    (predict_form("/predict"))
                                }
                            }
                        }
                    }
                }
                (footer())
            }
        }
    }
}
