use maud::{html, Markup, DOCTYPE};
use poem::http::StatusCode;
use poem::web::{Data, Form, Html};
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::web::form::PredictForm;
use crate::web::partials::{
    footer, headers, model_unavailable, predict_form, risk_result, validation_error,
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

/// The single-page dashboard: hero, the three-step explainer, the calculator
/// and the banded result.
fn page(outcome: Option<Markup>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "SafeRoad | National Risk Estimator" }
            }
            body {
                section.hero.is-dark.is-medium {
                    div.hero-body {
                        div.container.has-text-centered {
                            h1.title."is-1" { "SafeRoad Predictor" }
                            h2.subtitle."is-4" {
                                "An assessment tool for national road safety. Analyze "
                                "environmental, infrastructural and temporal factors to "
                                "estimate accident risks instantly."
                            }
                        }
                    }
                }
                section.section {
                    div.container {
                        div.content."is-medium" {
                            p {
                                strong { "Understanding road risk is the first step toward prevention. " }
                                "Road accidents are rarely caused by a single factor: they result "
                                "from interactions between weather, road infrastructure and "
                                "temporal patterns. The estimator aggregates historical traffic "
                                "data into a risk index score between 0.0 and 1.0."
                            }
                        }
                        (explainer())
                        h2.title."is-3".has-text-centered."mt-6" { "Risk calculator" }
                        p.subtitle.has-text-centered { "Enter the scenario details below" }
                        div.columns.is-centered {
                            div.column."is-10" {
                                @if let Some(outcome) = outcome {
                                    (outcome)
                                }
                                div.box {
                                    (predict_form("/"))
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

fn explainer() -> Markup {
    html! {
        div.columns."mt-5" {
            (step_card("fas fa-pen", "1. Configure", "Input the road characteristics: infrastructure type, lane count and curvature."))
            (step_card("fas fa-cloud-sun", "2. Set conditions", "Adjust environmental factors such as weather, lighting and time of day."))
            (step_card("fas fa-chart-line", "3. Analyze", "The model processes the variables and returns an immediate risk probability index."))
        }
    }
}

fn step_card(icon: &str, title: &str, text: &str) -> Markup {
    html! {
        div.column."is-4" {
            div.box.has-text-centered {
                span.icon.is-large.has-text-link { i class=(format!("{icon} fa-2x")) {} }
                h3.title."is-5"."mt-3" { (title) }
                p { (text) }
            }
        }
    }
}
