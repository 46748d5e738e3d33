use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod helpers;
mod math;
mod model;
mod models;
mod opts;
mod prelude;
mod trainer;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    helpers::tracing::init()?;
    match opts.subcommand {
        Subcommand::Train(opts) => trainer::run(&opts),
        Subcommand::Web(opts) => web::run_form_app(opts).await,
        Subcommand::Dashboard(opts) => web::run_dashboard(opts).await,
    }
}
