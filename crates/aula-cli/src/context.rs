use aula_auth::{SessionHandle, SessionStore};
use aula_client::{ApiClient, AuthService, InterventionService, StudentService, UserService};
use aula_config::AulaConfig;

/// Everything a command handler needs: configuration, the session, and a
/// client bound to both.
pub struct AppContext {
    pub config: AulaConfig,
    pub session: SessionHandle,
    pub client: ApiClient,
}

impl AppContext {
    pub fn init(config: AulaConfig) -> anyhow::Result<Self> {
        let session = match config.session.resolved_dir() {
            Some(dir) => SessionHandle::persistent(SessionStore::new(dir)),
            None => {
                tracing::warn!("no home directory; session will not be persisted");
                SessionHandle::in_memory()
            }
        };
        let client = ApiClient::new(&config.api, session.clone())?;
        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn auth(&self) -> AuthService<ApiClient> {
        AuthService::new(self.client.clone())
    }

    pub fn interventions(&self) -> InterventionService<ApiClient> {
        InterventionService::new(self.client.clone())
    }

    pub fn students(&self) -> StudentService<ApiClient> {
        StudentService::new(self.client.clone())
    }

    pub fn users(&self) -> UserService<ApiClient> {
        UserService::new(self.client.clone())
    }

    /// The signed-in user, or a hint to log in first.
    pub fn require_user(&self) -> anyhow::Result<aula_core::entities::User> {
        self.session
            .user()
            .ok_or_else(|| anyhow::anyhow!("not signed in. Run 'aula auth login' first."))
    }
}
