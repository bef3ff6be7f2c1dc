use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Errors raised by the generic resource actor and its client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the generated ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    /// A key that must be unique across every stored entity (e.g. an email).
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), FrameworkError> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;
    fn on_delete(&self) -> Result<(), FrameworkError> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, FrameworkError>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Find { filter, respond_to } => {
                    let found = self.store.values().filter(|item| filter(item)).cloned().collect();
                    let _ = respond_to.send(Ok(found));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.on_update(patch).map(|()| item.clone()),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = match self.store.get(&id).map(|item| item.on_delete()) {
                        Some(Ok(())) => {
                            self.store.remove(&id);
                            Ok(())
                        }
                        Some(Err(e)) => Err(e),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Shutdown => break,
            }
        }
        debug!("Resource actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params)?;

        if let Some(key) = item.unique_key() {
            if self.store.values().any(|existing| existing.unique_key().as_deref() == Some(key.as_str())) {
                warn!(key = %key, "Rejected duplicate entity");
                return Err(FrameworkError::Conflict(key));
            }
        }

        item.on_create()?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }
}

/// Sequential string ids of the form `<prefix>_<n>`, starting at 1.
pub fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R: Send>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T> + Send,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn find(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        let filter: Filter<T> = Box::new(filter);
        self.request(|respond_to| ResourceRequest::Find { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: String,
        label: String,
        locked: bool,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
    }

    #[derive(Debug)]
    struct ShelfPatch {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Lock,
    }

    impl Entity for Shelf {
        type Id = String;
        type CreateParams = ShelfCreate;
        type Patch = ShelfPatch;
        type Action = ShelfAction;
        type ActionResult = bool;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: ShelfCreate) -> Result<Self, FrameworkError> {
            if params.label.is_empty() {
                return Err(FrameworkError::Validation("label is empty".into()));
            }
            Ok(Self { id, label: params.label, locked: false })
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.label.clone())
        }

        fn on_update(&mut self, patch: ShelfPatch) -> Result<(), FrameworkError> {
            if self.locked {
                return Err(FrameworkError::Validation("shelf is locked".into()));
            }
            if let Some(label) = patch.label {
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: ShelfAction) -> Result<bool, FrameworkError> {
            match action {
                ShelfAction::Lock => {
                    let changed = !self.locked;
                    self.locked = true;
                    Ok(changed)
                }
            }
        }
    }

    fn spawn_shelves() -> ResourceClient<Shelf> {
        let (actor, client) = ResourceActor::new(10, sequential_ids("shelf"));
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_shelves();

        let id = client.create(ShelfCreate { label: "A".into() }).await.unwrap();
        assert_eq!(id, "shelf_1");

        assert!(client.perform_action(id.clone(), ShelfAction::Lock).await.unwrap());
        assert!(!client.perform_action(id.clone(), ShelfAction::Lock).await.unwrap());

        let err = client.update(id.clone(), ShelfPatch { label: Some("B".into()) }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Validation("shelf is locked".into()));

        let shelf = client.get(id).await.unwrap().unwrap();
        assert_eq!(shelf.label, "A");
    }

    #[tokio::test]
    async fn test_unique_key_conflict() {
        let client = spawn_shelves();

        client.create(ShelfCreate { label: "A".into() }).await.unwrap();
        let err = client.create(ShelfCreate { label: "A".into() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Conflict("A".into()));

        let err = client.create(ShelfCreate { label: String::new() }).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Validation(_)));
    }

    #[tokio::test]
    async fn test_find_and_delete() {
        let client = spawn_shelves();

        let a = client.create(ShelfCreate { label: "A".into() }).await.unwrap();
        client.create(ShelfCreate { label: "B".into() }).await.unwrap();

        let found = client.find(|shelf: &Shelf| shelf.label == "B").await.unwrap();
        assert_eq!(found.len(), 1);

        client.delete(a.clone()).await.unwrap();
        assert_eq!(client.get(a.clone()).await.unwrap(), None);
        assert_eq!(client.delete(a).await.unwrap_err(), FrameworkError::NotFound("shelf_1".into()));
    }

    #[tokio::test]
    async fn test_shutdown_stops_actor() {
        let (actor, client) = ResourceActor::<Shelf>::new(4, sequential_ids("shelf"));
        let handle = tokio::spawn(actor.run());

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        assert_eq!(client.get("shelf_1".into()).await.unwrap_err(), FrameworkError::ActorClosed);
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (actor, client) = ResourceActor::<Shelf>::new(1, sequential_ids("shelf"));
        drop(actor);
        let err = client.get("shelf_1".into()).await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
    }
}
