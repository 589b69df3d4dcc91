use eyre::eyre;
use model::errors::StudioError;
use model::session::Session;
use model::user::{Role, User};
use storage::user::UserStore;
use tx_macro::tx;

#[derive(Clone)]
pub struct Users {
    store: UserStore,
}

/// Outcome of a registration call: the email either already had an account
/// or a fresh one was created.
pub enum Registration {
    Created(User),
    Existing(User),
}

impl Users {
    pub(crate) fn new(store: UserStore) -> Self {
        Users { store }
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<User>, StudioError> {
        Ok(self.store.all(session).await?)
    }

    pub async fn find_by_email(
        &self,
        session: &mut Session,
        email: &str,
    ) -> Result<Option<User>, StudioError> {
        Ok(self.store.find_by_email(session, email).await?)
    }

    /// Registration is keyed on email. A known email returns the stored
    /// account, back-filling `role = member` on documents that predate the
    /// role field. An unknown email gets a fresh member account.
    #[tx]
    pub async fn register(
        &self,
        session: &mut Session,
        name: Option<String>,
        email: String,
        image: Option<String>,
    ) -> Result<Registration, StudioError> {
        if let Some(mut existing) = self.store.find_by_email(session, &email).await? {
            if existing.role.is_none() {
                self.store.set_role(session, existing.id, Role::Member).await?;
                existing.role = Some(Role::Member);
                existing.version += 1;
            }
            return Ok(Registration::Existing(existing));
        }

        let user = User::new(name, email.clone(), image);
        if self.store.insert(session, &user).await? {
            Ok(Registration::Created(user))
        } else {
            // Lost the upsert race; somebody registered this email first.
            let existing = self
                .store
                .find_by_email(session, &email)
                .await?
                .ok_or_else(|| eyre!("User upsert lost for {}", email))?;
            Ok(Registration::Existing(existing))
        }
    }

    /// Upserts a user document by email without touching an existing one.
    pub(crate) async fn import(
        &self,
        session: &mut Session,
        user: &User,
    ) -> Result<bool, StudioError> {
        Ok(self.store.insert(session, user).await?)
    }
}
