//! Given steps for request dispatch BDD scenarios.

use super::world::{
    DeleteItem, DeleteItemHandlerA, DeleteItemHandlerB, DispatchWorld, Ping, PingHandler,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchboard::mediator::{adapters::memory::ServiceLifetime, domain::TypeDeclaration};

#[given("the ping request is declared")]
fn ping_request_declared(world: &mut DispatchWorld) {
    world.manifest.declare(TypeDeclaration::of::<Ping>().request());
}

#[given("the ping handler is declared")]
fn ping_handler_declared(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    world
        .manifest
        .declare(TypeDeclaration::of::<PingHandler>().handles::<Ping>());
    world
        .container
        .add_handler::<Ping, _, _>(ServiceLifetime::Scoped, || PingHandler)
        .wrap_err("register ping handler")?;
    Ok(())
}

#[given("the delete item request is declared")]
fn delete_item_request_declared(world: &mut DispatchWorld) {
    world
        .manifest
        .declare(TypeDeclaration::of::<DeleteItem>().void_request());
}

#[given(r#"delete item handler "{variant}" is declared"#)]
fn delete_item_handler_declared(
    world: &mut DispatchWorld,
    variant: String,
) -> Result<(), eyre::Report> {
    match variant.as_str() {
        "A" => world.manifest.declare(
            TypeDeclaration::of::<DeleteItemHandlerA>().handles_void::<DeleteItem>(),
        ),
        "B" => world.manifest.declare(
            TypeDeclaration::of::<DeleteItemHandlerB>().handles_void::<DeleteItem>(),
        ),
        other => return Err(eyre::eyre!("unknown delete item handler variant '{other}'")),
    };
    Ok(())
}
