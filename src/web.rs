//! Web front ends over the trained model.

use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::CatchPanic;
use poem::{get, Endpoint, EndpointExt, Route, Server};

use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SecurityHeadersMiddleware};
use crate::web::state::ModelState;

mod form;
mod middleware;
mod partials;
mod state;
mod views;

/// Runs the form-based front end: a landing page and a predict form.
pub async fn run_form_app(opts: WebOpts) -> Result {
    let state = ModelState::load(&opts.model);
    serve(&opts, create_form_app(state)).await
}

/// Runs the single-page dashboard front end.
pub async fn run_dashboard(opts: WebOpts) -> Result {
    let state = ModelState::load(&opts.model);
    serve(&opts, create_dashboard_app(state)).await
}

async fn serve(opts: &WebOpts, app: impl Endpoint + 'static) -> Result {
    info!(host = opts.host.as_str(), port = opts.port, "listening");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run(app)
        .await?;
    Ok(())
}

fn create_form_app(state: ModelState) -> impl Endpoint {
    Route::new()
        .at("/", get(views::home::get))
        .at("/predict", get(views::predict::get).post(views::predict::post))
        .data(state)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
}

fn create_dashboard_app(state: ModelState) -> impl Endpoint {
    Route::new()
        .at("/", get(views::dashboard::get).post(views::dashboard::post))
        .data(state)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
}
