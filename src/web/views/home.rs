use maud::{html, DOCTYPE};
use poem::handler;
use poem::web::Html;

use crate::prelude::*;
use crate::web::partials::{footer, headers, navbar};

/// Landing page of the form-based front end.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get() -> Html<String> {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "SafeRoad" }
            }
            body {
                (navbar())
                section.hero.is-link.is-medium {
                    div.hero-body {
                        div.container.has-text-centered {
                            h1.title."is-1" { "SafeRoad Predictor" }
                            h2.subtitle."is-4" {
                                "Estimate road-accident risk from infrastructure, "
                                "environment and temporal factors."
                            }
                            a.button.is-white.is-outlined.is-medium href="/predict" {
                                span.icon { i.fas.fa-calculator {} }
                                span { "Open the risk calculator" }
                            }
                        }
                    }
                }
                (footer())
            }
        }
    };
    Html(markup.into_string())
}
