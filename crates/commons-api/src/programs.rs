// Program endpoints
//
// `GET/POST /programs` and `GET/PUT /programs/{id}`. No deletion endpoint
// exists on the backend.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ProgramCreate, ProgramResponse, ProgramUpdate};

impl ApiClient {
    /// List every program.
    ///
    /// `GET /programs`
    pub async fn list_programs(&self) -> Result<Vec<ProgramResponse>, Error> {
        let url = self.url(&["programs"])?;
        debug!("listing programs");
        self.get(url).await
    }

    /// Fetch one program, including the denormalized provider name.
    ///
    /// `GET /programs/{id}`
    pub async fn get_program(&self, id: &str) -> Result<ProgramResponse, Error> {
        let url = self.url(&["programs", id])?;
        debug!(program_id = id, "fetching program");
        self.get(url).await
    }

    /// Create a program. The backend assigns `program_id`.
    ///
    /// `POST /programs`
    pub async fn create_program(&self, body: &ProgramCreate) -> Result<ProgramResponse, Error> {
        let url = self.url(&["programs"])?;
        debug!(name = %body.name, "creating program");
        self.post(url, body).await
    }

    /// Update a program with any subset of fields. Returns the stored record.
    ///
    /// `PUT /programs/{id}`
    pub async fn update_program(
        &self,
        id: &str,
        body: &ProgramUpdate,
    ) -> Result<ProgramResponse, Error> {
        let url = self.url(&["programs", id])?;
        debug!(program_id = id, "updating program");
        self.put(url, body).await
    }
}
