
use oxide_component::{create_test_spawner, ComponentFactory, QueuedSpawner, TestRenderHost};
pub(crate) use movie_component::*;

mod instance_tests;
mod state_mutation_tests;

pub(crate) struct IntegrationTest {
    pub(crate) factory: ComponentFactory<TestRenderHost>,
    pub(crate) host: TestRenderHost,
    pub(crate) spawner: QueuedSpawner,
}

// Deferred results settle inside the controller call.
pub(crate) fn given_a_synchronous_spawner() -> IntegrationTest {
    let host = TestRenderHost::new();
    let factory = ComponentFactory::new(host.clone(), create_test_spawner());

    IntegrationTest {
        factory,
        host,
        spawner: QueuedSpawner::new(),
    }
}

// Deferred results settle only when the test runs the spawner.
pub(crate) fn given_a_queued_spawner() -> IntegrationTest {
    let host = TestRenderHost::new();
    let spawner = QueuedSpawner::new();
    let factory = ComponentFactory::new(host.clone(), spawner.clone());

    IntegrationTest {
        factory,
        host,
        spawner,
    }
}
