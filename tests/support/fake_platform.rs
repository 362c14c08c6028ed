// ABOUTME: In-memory fake of the platform control plane for tests.
// ABOUTME: Models app existence and route bindings, records operations.

use async_trait::async_trait;
use greenlight::platform::{AppDetail, AppError, AppOps};
use greenlight::types::AppIdentity;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};

/// An in-memory platform: applications by name, route bindings by app id.
///
/// Bindings track ids rather than names so a rename keeps existing bindings,
/// the way the real control plane behaves. Mutating operations are recorded
/// (including failed attempts) for order assertions, and any operation can
/// be made to fail by signature prefix.
pub struct FakePlatform {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    apps: BTreeMap<String, FakeApp>,
    bindings: BTreeMap<String, BTreeSet<u64>>,
    ops: Vec<String>,
    queries: Vec<String>,
    fail_on: Option<String>,
    watched_route: Option<String>,
    min_bindings_seen: Option<usize>,
}

struct FakeApp {
    id: u64,
    running: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Create an application. Returns its id for binding assertions.
    pub fn add_app(&self, name: &str, running: bool) -> u64 {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.apps.insert(name.to_string(), FakeApp { id, running });
        id
    }

    /// Bind a route to an existing application.
    pub fn bind(&self, route: &str, app_name: &str) {
        let mut state = self.state.lock();
        let id = state.apps.get(app_name).expect("app must exist to bind").id;
        state.bindings.entry(route.to_string()).or_default().insert(id);
    }

    /// Fail any operation whose recorded signature starts with `prefix`.
    pub fn fail_on(&self, prefix: &str) {
        self.state.lock().fail_on = Some(prefix.to_string());
    }

    pub fn clear_failures(&self) {
        self.state.lock().fail_on = None;
    }

    /// Track the minimum number of applications bound to `route` observed
    /// after every mutation.
    pub fn watch_route(&self, route: &str) {
        let mut state = self.state.lock();
        let current = state.bindings.get(route).map_or(0, BTreeSet::len);
        state.watched_route = Some(route.to_string());
        state.min_bindings_seen = Some(current);
    }

    pub fn min_bindings_seen(&self) -> usize {
        self.state
            .lock()
            .min_bindings_seen
            .expect("watch_route must be called first")
    }

    /// Mutating operations in the order they were attempted.
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().ops.clone()
    }

    /// Existence queries in the order they were attempted.
    pub fn queries(&self) -> Vec<String> {
        self.state.lock().queries.clone()
    }

    pub fn has_app(&self, name: &str) -> bool {
        self.state.lock().apps.contains_key(name)
    }

    pub fn app_id(&self, name: &str) -> Option<u64> {
        self.state.lock().apps.get(name).map(|a| a.id)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.state.lock().apps.get(name).is_some_and(|a| a.running)
    }

    /// Names of the applications bound to a route.
    pub fn bound_apps(&self, route: &str) -> Vec<String> {
        let state = self.state.lock();
        let Some(ids) = state.bindings.get(route) else {
            return Vec::new();
        };
        state
            .apps
            .iter()
            .filter(|(_, app)| ids.contains(&app.id))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn check_fail(&self, signature: &str) -> Result<(), AppError> {
        if let Some(prefix) = &self.fail_on
            && signature.starts_with(prefix.as_str())
        {
            return Err(AppError::Api {
                status: 500,
                message: format!("injected failure for {signature}"),
            });
        }
        Ok(())
    }

    fn record_op(&mut self, signature: String) -> Result<(), AppError> {
        self.ops.push(signature.clone());
        self.check_fail(&signature)
    }

    fn observe_bindings(&mut self) {
        if let Some(route) = self.watched_route.clone() {
            let current = self.bindings.get(&route).map_or(0, BTreeSet::len);
            let min = self.min_bindings_seen.unwrap_or(current);
            self.min_bindings_seen = Some(min.min(current));
        }
    }
}

#[async_trait]
impl AppOps for FakePlatform {
    async fn get_app_details(&self, app: &AppIdentity) -> Result<Option<AppDetail>, AppError> {
        let mut state = self.state.lock();
        let signature = format!("get_app_details({})", app.name());
        state.queries.push(signature.clone());
        state.check_fail(&signature)?;

        Ok(state.apps.get(app.name().as_str()).map(|a| AppDetail {
            name: app.name().to_string(),
            state: Some(if a.running { "started" } else { "stopped" }.to_string()),
            instances: Some(1),
        }))
    }

    async fn map_route(&self, app: &AppIdentity) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.record_op(format!("map_route({}@{})", app.name(), app.route()))?;

        let id = state
            .apps
            .get(app.name().as_str())
            .ok_or_else(|| AppError::NotFound(app.name().to_string()))?
            .id;
        state.bindings.entry(app.route()).or_default().insert(id);
        state.observe_bindings();
        Ok(())
    }

    async fn unmap_route(&self, app: &AppIdentity) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.record_op(format!("unmap_route({}@{})", app.name(), app.route()))?;

        // Unbinding an unbound route is success.
        let id = state.apps.get(app.name().as_str()).map(|a| a.id);
        if let Some(id) = id
            && let Some(bound) = state.bindings.get_mut(&app.route())
        {
            bound.remove(&id);
        }
        state.observe_bindings();
        Ok(())
    }

    async fn rename_app(&self, from: &AppIdentity, to: &AppIdentity) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.record_op(format!("rename_app({}->{})", from.name(), to.name()))?;

        if state.apps.contains_key(to.name().as_str()) {
            return Err(AppError::Conflict(to.name().to_string()));
        }
        let app = state
            .apps
            .remove(from.name().as_str())
            .ok_or_else(|| AppError::NotFound(from.name().to_string()))?;
        state.apps.insert(to.name().to_string(), app);
        state.observe_bindings();
        Ok(())
    }

    async fn stop_app(&self, app: &AppIdentity) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.record_op(format!("stop_app({})", app.name()))?;

        let entry = state
            .apps
            .get_mut(app.name().as_str())
            .ok_or_else(|| AppError::NotFound(app.name().to_string()))?;
        entry.running = false;
        state.observe_bindings();
        Ok(())
    }

    async fn delete_app(&self, app: &AppIdentity) -> Result<(), AppError> {
        let mut state = self.state.lock();
        state.record_op(format!("delete_app({})", app.name()))?;

        let removed = state
            .apps
            .remove(app.name().as_str())
            .ok_or_else(|| AppError::NotFound(app.name().to_string()))?;
        for bound in state.bindings.values_mut() {
            bound.remove(&removed.id);
        }
        state.observe_bindings();
        Ok(())
    }
}
