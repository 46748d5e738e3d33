//! Shared maud fragments.

use clap::crate_version;
use maud::{html, Markup};

use crate::model::RiskBand;
use crate::models::{Lighting, RoadType, TimeOfDay, Weather, CURVATURE_RANGE, NUM_LANES_RANGE};
use crate::web::form::SchemaViolation;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.3/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.3/css/all.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
    }
}

pub fn navbar() -> Markup {
    html! {
        nav.navbar.has-shadow role="navigation" aria-label="main navigation" {
            div.container {
                div.navbar-brand {
                    a.navbar-item href="/" {
                        span.icon.has-text-link { i.fas.fa-road {} }
                        strong { "SafeRoad" }
                    }
                }
            }
        }
    }
}

pub fn footer() -> Markup {
    html! {
        footer.footer {
            div.container {
                p.has-text-centered.has-text-grey {
                    "SafeRoad " (crate_version!())
                    ", a road-accident risk estimator built with "
                    a href="https://www.rust-lang.org/" { "Rust" }
                    " and "
                    a href="https://bulma.io/" { "Bulma" }
                    "."
                }
            }
        }
    }
}

/// The prediction form shared by both front ends. Every schema field is a
/// required input: booleans are yes/no selects so that the browser always
/// submits them.
pub fn predict_form(action: &str) -> Markup {
    html! {
        form method="POST" action=(action) {
            div.columns.is-multiline {
                div.column."is-6" {
                    (category_select("road_type", "Road type", &RoadType::ALL.map(RoadType::to_str)))
                    (num_lanes_input())
                    (curvature_input())
                    (category_select("lighting", "Lighting", &Lighting::ALL.map(Lighting::to_str)))
                    (category_select("weather", "Weather", &Weather::ALL.map(Weather::to_str)))
                    (category_select("time_of_day", "Time of day", &TimeOfDay::ALL.map(TimeOfDay::to_str)))
                }
                div.column."is-6" {
                    (flag_select("road_signs_present", "Road signs present", true))
                    (flag_select("public_road", "Public road", true))
                    (flag_select("holiday", "Holiday", false))
                    (flag_select("school_season", "School season", false))
                    (flag_select("high_speed", "High speed (limit above 45)", false))
                }
            }
            div.field."mt-4" {
                div.control {
                    button.button.is-link.is-fullwidth type="submit" { "Calculate risk score" }
                }
            }
        }
    }
}

pub fn category_select(field: &str, label: &str, options: &[&str]) -> Markup {
    html! {
        div.field {
            label.label for=(field) { (label) }
            div.control {
                div.select.is-fullwidth {
                    select id=(field) name=(field) {
                        @for option in options {
                            option value=(option) { (option) }
                        }
                    }
                }
            }
        }
    }
}

pub fn flag_select(field: &str, label: &str, default_yes: bool) -> Markup {
    html! {
        div.field {
            label.label for=(field) { (label) }
            div.control {
                div.select.is-fullwidth {
                    select id=(field) name=(field) {
                        option value="1" selected[default_yes] { "Yes" }
                        option value="0" selected[!default_yes] { "No" }
                    }
                }
            }
        }
    }
}

fn num_lanes_input() -> Markup {
    html! {
        div.field {
            label.label for="num_lanes" { "Number of lanes" }
            div.control {
                input.input id="num_lanes" name="num_lanes" type="number"
                    min=(NUM_LANES_RANGE.start()) max=(NUM_LANES_RANGE.end()) value="2" required;
            }
        }
    }
}

fn curvature_input() -> Markup {
    html! {
        div.field {
            label.label for="curvature" { "Curvature (0 = straight, 1 = sharp)" }
            div.control {
                input.input id="curvature" name="curvature" type="number" step="0.05"
                    min=(CURVATURE_RANGE.start()) max=(CURVATURE_RANGE.end()) value="0.2" required;
            }
        }
    }
}

/// The banded result box: color, icon and status line per severity tier.
pub fn risk_result(risk: f64) -> Markup {
    let (class, icon, status) = match RiskBand::from_risk(risk) {
        RiskBand::Critical => ("is-danger", "fas fa-ban", "CRITICAL RISK DETECTED"),
        RiskBand::Elevated => ("is-warning", "fas fa-exclamation-triangle", "ELEVATED RISK"),
        RiskBand::Low => ("is-success", "fas fa-check-circle", "LOW RISK ENVIRONMENT"),
    };
    html! {
        article.message.(class) {
            div.message-header {
                p {
                    span.icon { i class=(icon) {} }
                    span { (status) }
                }
            }
            div.message-body.has-text-centered {
                p.title."is-1" { (format!("{risk:.4}")) }
                p.subtitle."is-6" { "Predicted risk probability index" }
            }
        }
    }
}

pub fn validation_error(violation: &SchemaViolation) -> Markup {
    html! {
        div.notification.is-danger {
            strong { "Invalid input: " }
            (violation.to_string())
        }
    }
}

pub fn model_unavailable() -> Markup {
    html! {
        div.notification.is-warning {
            strong { "Model unavailable. " }
            "The model artifact could not be loaded, predictions are disabled. "
            "Train a model and restart the service."
        }
    }
}
