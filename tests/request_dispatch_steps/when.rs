//! When steps for request dispatch BDD scenarios.

use std::sync::Arc;

use super::world::{DispatchWorld, Ping, run_async};
use rstest_bdd_macros::when;
use switchboard::mediator::services::{Mediator, RegistryConfig, build_registry};
use tokio_util::sync::CancellationToken;

#[when("the registry is built")]
fn registry_is_built(world: &mut DispatchWorld) {
    let result = build_registry([&world.manifest], RegistryConfig::default()).map(Arc::new);
    world.registry_result = Some(result);
}

#[when("a ping with sequence {seq:u32} is sent")]
fn ping_is_sent(world: &mut DispatchWorld, seq: u32) -> Result<(), eyre::Report> {
    let registry = match world.registry_result.as_ref() {
        Some(Ok(registry)) => Arc::clone(registry),
        Some(Err(err)) => return Err(eyre::eyre!("registry failed to build: {err}")),
        None => return Err(eyre::eyre!("registry has not been built")),
    };
    let provider = std::mem::take(&mut world.container).into_provider();
    let mediator = Mediator::new(registry, provider.create_scope());
    world.last_send = Some(run_async(
        mediator.send(Ping { seq }, CancellationToken::new()),
    ));
    Ok(())
}
