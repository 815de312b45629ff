use actor_framework::{
    ActorEntity, FrameworkError, InMemoryRemote, RemoteError, Reporter, ResourceActor, StoreEvent,
};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: String,
    title: String,
    closed: bool,
}

#[derive(Debug, Clone)]
struct TicketCreate {
    title: String,
}

#[derive(Debug)]
struct TicketUpdate {
    title: Option<String>,
}

#[derive(Debug)]
enum TicketAction {
    Close,
    IsClosed,
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum TicketError {
    #[error("title is required")]
    MissingTitle,
    #[error("already closed")]
    AlreadyClosed,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = String;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type ActionResult = bool;
    type Context = ();
    type Error = TicketError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: TicketCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            title: params.title,
            closed: false,
        })
    }

    fn prepare_create(params: TicketCreate, _: &[&Self], _: &()) -> Result<TicketCreate, TicketError> {
        if params.title.trim().is_empty() {
            return Err(TicketError::MissingTitle);
        }
        Ok(params)
    }

    fn matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }

    async fn on_update(&mut self, update: TicketUpdate, _: &()) -> Result<(), TicketError> {
        if let Some(title) = update.title {
            self.title = title;
        }
        Ok(())
    }

    fn is_mutation(action: &TicketAction) -> bool {
        !matches!(action, TicketAction::IsClosed)
    }

    async fn handle_action(&mut self, action: TicketAction, _: &()) -> Result<bool, TicketError> {
        match action {
            TicketAction::Close if self.closed => Err(TicketError::AlreadyClosed),
            TicketAction::Close => {
                self.closed = true;
                Ok(true)
            }
            TicketAction::IsClosed => Ok(self.closed),
        }
    }
}

fn ticket(id: &str, title: &str) -> Ticket {
    Ticket {
        id: id.into(),
        title: title.into(),
        closed: false,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let remote = InMemoryRemote::with_items(vec![ticket("t1", "Door sensor")]).shared();
    let (actor, client) = ResourceActor::<Ticket>::new(10, remote.clone());
    tokio::spawn(actor.run(()));
    let mut events = client.subscribe();

    // 1. Load
    assert_eq!(client.load().await.unwrap(), 1);
    assert_eq!(events.recv().await.unwrap(), StoreEvent::Loaded { count: 1 });

    // 2. Create: the remote assigns the id
    let created = client
        .create(TicketCreate {
            title: "Brake pads".into(),
        })
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::Created(created.id.clone())
    );

    // 3. Natural order
    let titles: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["Brake pads", "Door sensor"]);

    // 4. Action is persisted
    assert!(client
        .perform_action(created.id.clone(), TicketAction::Close)
        .await
        .unwrap());
    let stored = remote
        .items()
        .into_iter()
        .find(|t| t.id == created.id)
        .unwrap();
    assert!(stored.closed);

    // 5. Read-only action does not touch the remote
    let updates_before = remote.calls().update;
    assert!(client
        .perform_action(created.id.clone(), TicketAction::IsClosed)
        .await
        .unwrap());
    assert_eq!(remote.calls().update, updates_before);

    // 6. Update
    let renamed = client
        .update(
            "t1".into(),
            TicketUpdate {
                title: Some("Door sensor (hall)".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Door sensor (hall)");

    // 7. Delete
    client.delete("t1".into()).await.unwrap();
    assert!(client.get("t1".into()).await.unwrap().is_none());
    assert_eq!(remote.items().len(), 1);
}

#[tokio::test]
async fn test_rejected_create_never_reaches_remote() {
    let remote = InMemoryRemote::<Ticket>::new().shared();
    let (actor, client) = ResourceActor::<Ticket>::new(10, remote.clone());
    tokio::spawn(actor.run(()));

    let err = client
        .create(TicketCreate { title: "  ".into() })
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity::<TicketError>().unwrap(),
        TicketError::MissingTitle
    );
    assert_eq!(remote.calls().create, 0);
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remote_failure_leaves_local_state_untouched() {
    let remote = InMemoryRemote::with_items(vec![ticket("t1", "Cable")]).shared();
    let (actor, client) = ResourceActor::<Ticket>::new(10, remote.clone());
    tokio::spawn(actor.run(()));
    client.load().await.unwrap();

    remote.fail_next(RemoteError::Unreachable("connection refused".into()));
    let err = client
        .perform_action("t1".into(), TicketAction::Close)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Remote(RemoteError::Unreachable(_))));
    assert!(!client.get("t1".into()).await.unwrap().unwrap().closed);

    remote.fail_next(RemoteError::Status {
        status: 500,
        message: "oops".into(),
    });
    assert!(client.load().await.is_err());
    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_view() {
    let remote = InMemoryRemote::with_items(vec![
        ticket("t1", "Door sensor"),
        ticket("t2", "Brake pads"),
        ticket("t3", "Door rollers"),
    ])
    .shared();
    let (actor, client) = ResourceActor::<Ticket>::new(10, remote);
    tokio::spawn(actor.run(()));
    client.load().await.unwrap();

    client.set_search("  DOOR ").await.unwrap();
    let view: Vec<String> = client
        .view()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(view, vec!["t3", "t1"]);

    client.set_search("").await.unwrap();
    assert_eq!(client.view().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let remote = InMemoryRemote::<Ticket>::new().shared();
    let (actor, client) = ResourceActor::<Ticket>::new(10, remote);
    tokio::spawn(actor.run(()));

    let err = client
        .update("nope".into(), TicketUpdate { title: None })
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "nope"));
}

#[tokio::test]
async fn test_zero_buffer_still_serves_requests() {
    let remote = InMemoryRemote::with_items(vec![ticket("t1", "Cable")]).shared();
    let (actor, client) = ResourceActor::<Ticket>::new(0, remote);
    tokio::spawn(actor.run(()));

    assert_eq!(client.load().await.unwrap(), 1);
    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[derive(Default)]
struct Recorded(Mutex<Vec<String>>);

impl Reporter for Recorded {
    fn success(&self, message: String) {
        self.0.lock().unwrap().push(format!("ok: {message}"));
    }

    fn failure(&self, error: &FrameworkError) {
        self.0.lock().unwrap().push(format!("error: {error}"));
    }
}

#[tokio::test]
async fn test_reporter_sees_writes_and_failures() {
    let remote = InMemoryRemote::with_items(vec![ticket("t1", "Cable")]).shared();
    let recorded = Arc::new(Recorded::default());
    let (actor, client) = ResourceActor::<Ticket>::new(10, remote.clone());
    tokio::spawn(actor.with_reporter(recorded.clone()).run(()));
    client.load().await.unwrap();

    client
        .perform_action("t1".into(), TicketAction::Close)
        .await
        .unwrap();
    // Read-only, so not reported.
    client
        .perform_action("t1".into(), TicketAction::IsClosed)
        .await
        .unwrap();
    client
        .perform_action("t1".into(), TicketAction::Close)
        .await
        .unwrap_err();
    remote.fail_next(RemoteError::Unreachable("connection refused".into()));
    client.load().await.unwrap_err();

    let messages = recorded.0.lock().unwrap().clone();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], "ok: Ticket updated");
    assert!(messages[1].contains("already closed"));
    assert!(messages[2].contains("connection refused"));
}
