//! engine::mock
//!
//! Mock engine implementation for deterministic testing.
//!
//! # Design
//!
//! The mock engine maps whole argument vectors to canned [`Invocation`]s
//! and records every call, so tests can assert both what the shell
//! dispatched and what it did with the outcome. Failure modes - an engine
//! error, a panicking handler - are configured explicitly.
//!
//! # Example
//!
//! ```
//! use quarterdeck::engine::{Engine, Invocation, MockEngine};
//!
//! let engine = MockEngine::new();
//! engine.respond(&["version"], Invocation {
//!     exit_code: 0,
//!     stdout: "App v1.0.0".to_string(),
//!     stderr: String::new(),
//! });
//!
//! let argv = vec!["version".to_string()];
//! let result = engine.invoke(&argv).unwrap();
//! assert_eq!(result.stdout, "App v1.0.0");
//! assert_eq!(engine.invocations().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{CommandNode, Engine, EngineError, Invocation};

/// Mock engine for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping, so clones share
/// one set of responses and one call record.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    inner: Arc<Mutex<MockEngineInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockEngineInner {
    /// Canned responses keyed by the space-joined argument vector.
    responses: HashMap<String, Invocation>,
    /// When set, every invocation returns this engine error.
    fail: Option<String>,
    /// When set, every invocation panics with this message.
    panic: Option<String>,
    /// Command tree handed to the catalog builder.
    tree: Vec<CommandNode>,
    /// Recorded argument vectors, in call order.
    invocations: Vec<Vec<String>>,
}

impl MockEngine {
    /// Create a mock with no responses configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for one exact argument vector.
    pub fn respond(&self, argv: &[&str], invocation: Invocation) {
        let key = argv.join(" ");
        self.lock().responses.insert(key, invocation);
    }

    /// Make every invocation return an engine error.
    pub fn fail_with(&self, message: &str) {
        self.lock().fail = Some(message.to_string());
    }

    /// Make every invocation panic, as a handler gone wrong would.
    pub fn panic_with(&self, message: &str) {
        self.lock().panic = Some(message.to_string());
    }

    /// Set the command tree returned by [`Engine::command_tree`].
    pub fn set_tree(&self, tree: Vec<CommandNode>) {
        self.lock().tree = tree;
    }

    /// Every argument vector invoked so far, in order.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.lock().invocations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockEngineInner> {
        self.inner.lock().expect("mock engine lock poisoned")
    }
}

impl Engine for MockEngine {
    fn invoke(&self, argv: &[String]) -> Result<Invocation, EngineError> {
        let panic_message;
        let outcome;
        {
            let mut inner = self.lock();
            inner.invocations.push(argv.to_vec());

            panic_message = inner.panic.clone();
            outcome = if let Some(message) = &inner.fail {
                Err(EngineError::Internal(message.clone()))
            } else {
                let key = argv.join(" ");
                Ok(inner.responses.get(&key).cloned().unwrap_or(Invocation {
                    exit_code: 2,
                    stdout: String::new(),
                    stderr: format!("no mock response for '{}'", key),
                }))
            };
        }

        // Panic outside the lock so the mock stays usable afterwards.
        if let Some(message) = panic_message {
            panic!("{}", message);
        }

        outcome
    }

    fn command_tree(&self) -> Vec<CommandNode> {
        self.lock().tree.clone()
    }
}
