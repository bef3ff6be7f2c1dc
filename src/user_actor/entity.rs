use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{User, UserCreate, UserPatch};

/// Custom actions for User entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Activate,
    Deactivate,
}

fn validate_email(email: &str) -> Result<(), FrameworkError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(FrameworkError::Validation(format!("invalid email: {}", email))),
    }
}

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    /// Whether the action changed anything.
    type ActionResult = bool;

    fn id(&self) -> &String {
        &self.id
    }

    /// New users start active.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, FrameworkError> {
        validate_email(&params.email)?;
        if params.username.trim().is_empty() {
            return Err(FrameworkError::Validation("username is required".into()));
        }
        Ok(Self {
            id,
            email: params.email,
            username: params.username,
            password_hash: params.password_hash,
            is_active: true,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<bool, FrameworkError> {
        let active = matches!(action, UserAction::Activate);
        let changed = self.is_active != active;
        self.is_active = active;
        Ok(changed)
    }
}
