use std::sync::Arc;

use anyhow::Context;

use crest::config::Config;
use crest::http::request::ParsedRequest;
use crest::http::response::Response;
use crest::routing::{Dispatcher, HandlerId, HandlerTable, Router, compile_source};
use crest::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let source = std::fs::read_to_string(&cfg.routes.file)
        .with_context(|| format!("Failed to read route file {}", cfg.routes.file.display()))?;
    let automaton = compile_source(&source)
        .with_context(|| format!("Failed to compile {}", cfg.routes.file.display()))?;

    // Every route answers with its handler name until real handlers are wired in.
    let mut handlers = HandlerTable::new();
    for id in automaton.handlers() {
        handlers.insert(id.clone(), named_handler(id.clone()));
    }
    let router = Arc::new(Router::new(Dispatcher::new(automaton), handlers));

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn named_handler(id: HandlerId) -> impl Fn(&ParsedRequest, &mut Response) + Send + Sync + 'static {
    move |req, res| {
        res.set_header("Content-Type", "text/plain");
        res.write_str(&format!("{} {} -> {}\n", req.method, req.uri_lossy(), id));
    }
}
