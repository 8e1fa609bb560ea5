//! Tokio runtime and mock service shared by the steps of one scenario.

use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Cloneable runtime handle; step functions are synchronous, so every
/// async call goes through [`SharedRuntime::block_on`].
#[derive(Clone)]
pub struct SharedRuntime(Rc<Runtime>);

impl SharedRuntime {
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.block_on(future)
    }
}

/// Returns the scenario runtime, creating it and starting the mock report
/// service the first time a step asks for them.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    let shared = match runtime.get() {
        Some(existing) => existing,
        None => {
            let created = SharedRuntime(Rc::new(Runtime::new()?));
            runtime.set(created.clone());
            created
        }
    };

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }
    Ok(shared)
}
