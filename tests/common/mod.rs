//! Shared helpers for integration tests

#![allow(dead_code)]

use muser::config::ServerConfig;
use muser::control::{AppState, ControlHandler, HttpServer};
use muser::player::{CommandRunner, PlayerBackend};
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(&[String]) -> Option<String> + Send + Sync;

/// Runner answering from a closure and recording every invocation
#[derive(Clone)]
pub struct ScriptedRunner {
    responder: Arc<Responder>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedRunner {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[String]) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runner that answers `metadata`, `status` and `position` with fixed text
    pub fn playing(metadata: &str, status: &str, position: &str) -> Self {
        let metadata = metadata.to_string();
        let status = status.to_string();
        let position = position.to_string();
        Self::new(move |args| match args.first().map(String::as_str) {
            Some("metadata") => Some(metadata.clone()),
            Some("status") => Some(status.clone()),
            Some("position") if args.len() == 1 => Some(position.clone()),
            _ => Some(String::new()),
        })
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded invocations whose first argument is `subcommand`
    pub fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|c| c.first().map(String::as_str) == Some(subcommand))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, args: &[String]) -> Option<String> {
        self.calls.lock().unwrap().push(args.to_vec());
        (self.responder)(args)
    }
}

/// Start a server on a free loopback port and return its base URL
pub async fn start_server(runner: Option<ScriptedRunner>) -> String {
    let backend = runner.map(PlayerBackend::with_runner);
    let state = AppState::new(ControlHandler::new(backend), "<html>muser test page</html>");

    let server = HttpServer::bind(&ServerConfig::default())
        .await
        .expect("Failed to bind test server");
    let url = server.url();
    server.spawn(state);
    url
}
