use std::sync::{Arc, Mutex};

use super::{
    given_a_synchronous_spawner, movie_definition, MockUnloadListener, TestDefinition, FILM,
};
use crate::movie_component::UnloadListener;
use oxide_component::Children;
use serde_json::{json, Value};

#[test]
fn given_a_component_when_state_set_should_replace_it_and_force_a_redraw() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(movie_definition()).unwrap();
    let component = class
        .instance_with(Some(json!({ "film": FILM })), Children::Absent)
        .unwrap();
    component.controller().unwrap();

    component.set_state(json!({ "rating": 5 }));

    // Replaced wholesale, never merged.
    assert_eq!(component.state(), json!({ "rating": 5 }));
    assert_eq!(component.view(), Value::Null);
    assert_eq!(test.host.redraw_requests(), vec![true]);
}

#[test]
fn given_a_state_setter_in_view_output_when_invoked_should_rerender_with_new_state() {
    let test = given_a_synchronous_spawner();
    let class = test
        .factory
        .create_component(TestDefinition::new().view(|context| {
            context.state().get("count").cloned().unwrap_or(json!(0))
        }))
        .unwrap();
    let component = class.instance().unwrap();
    let setter = component.state_setter();
    let on_increment = move || setter.set(json!({ "count": 1 }));

    assert_eq!(component.view(), json!(0));
    on_increment();

    assert_eq!(component.view(), json!(1));
    assert_eq!(test.host.redraw_requests(), vec![true]);
}

#[test]
fn given_state_set_during_a_view_pass_should_not_force_a_redraw_or_leak_into_the_pass() {
    let test = given_a_synchronous_spawner();
    let class = test
        .factory
        .create_component(TestDefinition::new().view(|context| {
            let before = context.state().clone();
            if before.get("visits").is_none() {
                context.set_state(json!({ "visits": 1 }));
            }
            // The running pass keeps its snapshot.
            assert_eq!(context.state(), &before);
            before
        }))
        .unwrap();
    let component = class.instance().unwrap();

    assert_eq!(component.view(), json!({}));
    assert_eq!(test.host.redraw_requests(), vec![false]);

    assert_eq!(component.view(), json!({ "visits": 1 }));
    component.set_state(json!({}));
    assert_eq!(test.host.redraw_requests(), vec![false, true]);
}

#[test]
fn given_a_child_state_set_during_a_parent_view_pass_should_not_force_a_redraw() {
    let test = given_a_synchronous_spawner();
    let child = test
        .factory
        .create_component(movie_definition())
        .unwrap()
        .instance()
        .unwrap();
    let parent = test
        .factory
        .create_component({
            let child_setter = child.state_setter();
            TestDefinition::new().view(move |_| {
                child_setter.set(json!({ "film": FILM }));
                json!("parent")
            })
        })
        .unwrap()
        .instance()
        .unwrap();

    assert_eq!(parent.view(), json!("parent"));
    assert_eq!(child.view(), json!(FILM));
    assert_eq!(test.host.redraw_requests(), vec![false]);

    child.set_state(json!({}));
    assert_eq!(test.host.redraw_requests(), vec![false, true]);
}

#[test]
fn given_an_unload_hook_when_unloaded_should_call_it_with_the_current_props() {
    let test = given_a_synchronous_spawner();
    let listener = Arc::new(Mutex::new(MockUnloadListener::new()));
    listener
        .lock()
        .unwrap()
        .expect_unloaded()
        .withf(|film| film.as_deref() == Some(FILM))
        .times(1)
        .return_const(());
    let class = test
        .factory
        .create_component({
            let listener = listener.clone();
            movie_definition().on_unload(move |context| {
                let film = context.prop("film").and_then(Value::as_str).map(str::to_string);
                listener.lock().unwrap().unloaded(film);
            })
        })
        .unwrap();
    let component = class
        .instance_with(Some(json!({ "film": FILM })), Children::Absent)
        .unwrap();

    component.unload();

    listener.lock().unwrap().checkpoint();
}

#[test]
fn given_no_unload_hook_when_unloaded_should_do_nothing() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(movie_definition()).unwrap();
    let component = class.instance().unwrap();

    component.unload();

    assert_eq!(component.state(), json!({}));
    assert!(test.host.redraw_requests().is_empty());
}
