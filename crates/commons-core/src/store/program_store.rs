// ── Program store ──
//
// Caches the program list and the currently viewed program. Every action
// awaits the backend before touching state, so a failed call leaves the
// cache as it was.

use std::sync::Arc;

use commons_api::ApiClient;
use commons_api::models::{ProgramCreate, ProgramUpdate};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{CreateProgramRequest, Program, ProgramId, UpdateProgramRequest};
use crate::store::Observable;
use crate::stream::StateStream;

/// Reactive store for programs. Cheaply cloneable.
#[derive(Clone)]
pub struct ProgramStore {
    inner: Arc<ProgramStoreInner>,
}

struct ProgramStoreInner {
    api: Arc<ApiClient>,
    programs: Observable<Arc<Vec<Arc<Program>>>>,
    program: Observable<Option<Arc<Program>>>,
}

impl ProgramStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            inner: Arc::new(ProgramStoreInner {
                api,
                programs: Observable::default(),
                program: Observable::default(),
            }),
        }
    }

    // ── State ────────────────────────────────────────────────────────

    /// Snapshot of the cached list.
    pub fn programs(&self) -> Arc<Vec<Arc<Program>>> {
        self.inner.programs.get()
    }

    /// The single program last fetched with [`get_program`](Self::get_program).
    pub fn program(&self) -> Option<Arc<Program>> {
        self.inner.program.get()
    }

    pub fn subscribe_programs(&self) -> StateStream<Arc<Vec<Arc<Program>>>> {
        self.inner.programs.subscribe()
    }

    pub fn subscribe_program(&self) -> StateStream<Option<Arc<Program>>> {
        self.inner.program.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Fetch every program and replace the cached list.
    pub async fn list_programs(&self) -> Result<Arc<Vec<Arc<Program>>>, CoreError> {
        let raw = self.inner.api.list_programs().await?;
        let list: Arc<Vec<Arc<Program>>> =
            Arc::new(raw.into_iter().map(|p| Arc::new(Program::from(p))).collect());
        debug!(count = list.len(), "program list replaced");
        self.inner.programs.set(Arc::clone(&list));
        Ok(list)
    }

    /// Fetch one program and make it the current one. The list is untouched.
    pub async fn get_program(&self, id: &ProgramId) -> Result<Arc<Program>, CoreError> {
        let raw = self.inner.api.get_program(id.as_str()).await?;
        let program = Arc::new(Program::from(raw));
        self.inner.program.set(Some(Arc::clone(&program)));
        Ok(program)
    }

    /// Create a program and put it at the head of the cached list.
    pub async fn create_program(
        &self,
        req: &CreateProgramRequest,
    ) -> Result<Arc<Program>, CoreError> {
        let raw = self
            .inner
            .api
            .create_program(&ProgramCreate::from(req))
            .await?;
        let created = Arc::new(Program::from(raw));
        debug!(program_id = %created.id, "program created");

        self.inner.programs.modify(|list| {
            let mut next = Vec::with_capacity(list.len() + 1);
            next.push(Arc::clone(&created));
            next.extend(list.iter().cloned());
            *list = Arc::new(next);
        });
        Ok(created)
    }

    /// Update a program and replace every cached copy with the stored record.
    ///
    /// The list entry whose id equals `id` is swapped in place; when no entry
    /// matches the list is left alone. The current program is replaced too
    /// when its id matches.
    pub async fn update_program(
        &self,
        id: &ProgramId,
        req: &UpdateProgramRequest,
    ) -> Result<Arc<Program>, CoreError> {
        let raw = self
            .inner
            .api
            .update_program(id.as_str(), &ProgramUpdate::from(req))
            .await?;
        let updated = Arc::new(Program::from(raw));

        let replaced = self.inner.programs.modify_if(|list| {
            let Some(pos) = list.iter().position(|p| &p.id == id) else {
                return false;
            };
            let next = Arc::make_mut(list);
            if let Some(slot) = next.get_mut(pos) {
                *slot = Arc::clone(&updated);
            }
            true
        });
        self.inner.program.modify_if(|current| match current {
            Some(p) if &p.id == id => {
                *current = Some(Arc::clone(&updated));
                true
            }
            _ => false,
        });
        debug!(program_id = %id, replaced, "program updated");
        Ok(updated)
    }

    // ── Local queries ────────────────────────────────────────────────

    /// Look up a program in the cached list.
    pub fn find_program(&self, id: &ProgramId) -> Option<Arc<Program>> {
        self.programs().iter().find(|p| &p.id == id).cloned()
    }

    /// Cached programs matching `pred`, in list order.
    pub fn filter_programs(&self, pred: impl Fn(&Program) -> bool) -> Vec<Arc<Program>> {
        self.programs().iter().filter(|p| pred(p)).cloned().collect()
    }

    /// Seed the list without a network call.
    pub fn preload(&self, programs: Vec<Program>) {
        self.inner
            .programs
            .set(Arc::new(programs.into_iter().map(Arc::new).collect()));
    }
}
