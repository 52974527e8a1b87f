//! Shared catalogue application used by the in-memory integration tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use switchboard::mediator::{
    adapters::memory::{ServiceContainer, ServiceLifetime, ServiceScope},
    domain::{
        CommandHandler, CommandKind, Contract, QueryHandler, QueryKind, Request, RequestHandler,
        TypeDeclaration, VoidRequest, VoidRequestHandler,
    },
    services::{Manifest, Mediator, RegistryConfig, build_registry},
};
use switchboard::outcome::{Failure, Outcome};
use tokio_util::sync::CancellationToken;

/// Item storage shared by every catalogue handler.
pub type Store = Arc<Mutex<BTreeMap<u64, String>>>;

/// Adds an item to the catalogue.
pub struct CreateItem {
    pub name: String,
}

impl Contract for CreateItem {
    type Kind = CommandKind;
    type Output = u64;
}

/// Reads an item name.
pub struct GetItem {
    pub id: u64,
}

impl Contract for GetItem {
    type Kind = QueryKind;
    type Output = String;
}

/// Removes an item.
pub struct RemoveItem {
    pub id: u64,
}

impl VoidRequest for RemoveItem {}

/// Waits until the caller cancels.
pub struct WaitForCancellation;

impl Request for WaitForCancellation {
    type Response = bool;
}

/// Handles [`CreateItem`].
pub struct CreateItemHandler {
    store: Store,
}

#[async_trait]
impl CommandHandler<CreateItem> for CreateItemHandler {
    async fn handle(&self, command: CreateItem, _cancellation: CancellationToken) -> Outcome<u64> {
        if command.name.trim().is_empty() {
            return Err(Failure::request_invalid(
                "item.name",
                ["name must not be empty"],
            ));
        }
        let mut items = self.store.lock().expect("store lock should not be poisoned");
        if items.values().any(|name| *name == command.name) {
            return Err(Failure::resource_conflict(
                "item.exists",
                [format!("item '{}' already exists", command.name)],
            ));
        }
        let id = items.keys().next_back().map_or(1, |last| last + 1);
        items.insert(id, command.name);
        Ok(id)
    }
}

/// Handles [`GetItem`].
pub struct GetItemHandler {
    store: Store,
}

#[async_trait]
impl QueryHandler<GetItem> for GetItemHandler {
    async fn handle(&self, query: GetItem, _cancellation: CancellationToken) -> Outcome<String> {
        let items = self.store.lock().expect("store lock should not be poisoned");
        items.get(&query.id).cloned().ok_or_else(|| {
            Failure::resource_not_found(
                "item.missing",
                [format!("item {} does not exist", query.id)],
            )
        })
    }
}

/// Handles [`RemoveItem`].
pub struct RemoveItemHandler {
    store: Store,
}

#[async_trait]
impl VoidRequestHandler<RemoveItem> for RemoveItemHandler {
    async fn handle(&self, request: RemoveItem, _cancellation: CancellationToken) {
        self.store
            .lock()
            .expect("store lock should not be poisoned")
            .remove(&request.id);
    }
}

/// Handles [`WaitForCancellation`].
pub struct WaitForCancellationHandler;

#[async_trait]
impl RequestHandler<WaitForCancellation> for WaitForCancellationHandler {
    async fn handle(&self, _request: WaitForCancellation, cancellation: CancellationToken) -> bool {
        cancellation.cancelled().await;
        true
    }
}

/// Declarations for every catalogue type.
pub fn catalogue_manifest() -> Manifest {
    Manifest::new("catalogue")
        .with(TypeDeclaration::of::<CreateItem>().request())
        .with(TypeDeclaration::of::<GetItem>().request())
        .with(TypeDeclaration::of::<RemoveItem>().void_request())
        .with(TypeDeclaration::of::<WaitForCancellation>().request())
        .with(TypeDeclaration::of::<CreateItemHandler>().handles::<CreateItem>())
        .with(TypeDeclaration::of::<GetItemHandler>().handles::<GetItem>())
        .with(TypeDeclaration::of::<RemoveItemHandler>().handles_void::<RemoveItem>())
        .with(
            TypeDeclaration::of::<WaitForCancellationHandler>()
                .handles::<WaitForCancellation>(),
        )
}

/// Registers every catalogue handler against `store`.
pub fn catalogue_container(store: &Store) -> ServiceContainer {
    let mut container = ServiceContainer::new();
    let create_store = Arc::clone(store);
    let get_store = Arc::clone(store);
    let remove_store = Arc::clone(store);
    container
        .add_handler::<CreateItem, _, _>(ServiceLifetime::Scoped, move || CreateItemHandler {
            store: Arc::clone(&create_store),
        })
        .and_then(|c| {
            c.add_handler::<GetItem, _, _>(ServiceLifetime::Transient, move || GetItemHandler {
                store: Arc::clone(&get_store),
            })
        })
        .and_then(|c| {
            c.add_void_handler::<RemoveItem, _, _>(ServiceLifetime::Singleton, move || {
                RemoveItemHandler {
                    store: Arc::clone(&remove_store),
                }
            })
        })
        .and_then(|c| {
            c.add_handler::<WaitForCancellation, _, _>(ServiceLifetime::Singleton, || {
                WaitForCancellationHandler
            })
        })
        .expect("catalogue handlers should register once");
    container
}

/// A wired catalogue mediator together with its backing store.
pub struct Catalogue {
    pub store: Store,
    pub mediator: Mediator<ServiceScope>,
}

/// Builds the catalogue application with an empty store.
pub fn catalogue() -> Catalogue {
    let store = Store::default();
    let registry = build_registry([&catalogue_manifest()], RegistryConfig::strict())
        .expect("catalogue manifest should validate");
    let provider = catalogue_container(&store).into_provider();
    Catalogue {
        store,
        mediator: Mediator::new(Arc::new(registry), provider.create_scope()),
    }
}
