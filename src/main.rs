use anyhow::Result;
use chrono::Utc;
use clap::{crate_version, App, Arg};
use quire::config::Config;
use quire::helpers::{display_date_and_time, robots_meta};
use quire::pipeline::Pipeline;
use quire::registry::Registry;
use quire::request::{parse_param, PageIdentity, Params, RequestContext};
use quire::sink::TracingSink;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = App::new("quire")
        .version(crate_version!())
        .about("Renders a blog's sidebar and robots policy for a simulated request")
        .arg(
            Arg::with_name("project")
                .long("project")
                .takes_value(true)
                .default_value(".")
                .help("Directory containing quire.yaml (or a descendant of it)"),
        )
        .arg(
            Arg::with_name("controller")
                .long("controller")
                .takes_value(true)
                .default_value("articles")
                .help("The controller serving the simulated page"),
        )
        .arg(
            Arg::with_name("action")
                .long("action")
                .takes_value(true)
                .default_value("index"),
        )
        .arg(
            Arg::with_name("param")
                .long("param")
                .short("p")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("A query parameter as key=value; may be repeated"),
        )
        .get_matches();

    let config = Config::from_directory(Path::new(
        matches.value_of("project").unwrap_or("."),
    ))?;

    let mut params = Params::new();
    for param in matches.values_of("param").into_iter().flatten() {
        let (key, value) = parse_param(param)?;
        params.insert(key, value);
    }
    let ctx = RequestContext::new(
        PageIdentity::new(
            matches.value_of("controller").unwrap_or("articles"),
            matches.value_of("action").unwrap_or("index"),
        ),
        params,
    );

    let pipeline = Pipeline::new(Arc::new(Registry::with_builtins()?), Arc::new(TracingSink));

    println!("{}", robots_meta(&config.blog, &ctx));
    println!(
        "{}",
        pipeline.render_blog(config.blog.id, &config.sidebar, &ctx)
    );
    println!(
        "<!-- rendered {} -->",
        display_date_and_time(
            &config.blog,
            &Utc::now().with_timezone(&config.time_zone)
        )?
    );
    Ok(())
}
