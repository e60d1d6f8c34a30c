use super::{film_prop_view, given_a_synchronous_spawner, movie_definition, TestDefinition, FILM};
use oxide_component::{Children, ComponentError, InvalidArgument};
use serde_json::{json, Value};

#[test]
fn given_film_props_when_viewed_should_render_the_film() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    let component = class
        .instance_with(Some(json!({ "film": FILM })), Children::Absent)
        .unwrap();

    assert_eq!(component.view(), json!(FILM));
}

#[test]
fn given_a_single_child_should_wrap_it_in_a_sequence() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();
    let child = json!({ "tag": "div", "attrs": { "className": "child-element" } });

    let component = class.instance_with(None, child.clone()).unwrap();

    assert_eq!(component.children(), vec![child]);
}

#[test]
fn given_an_array_of_children_should_preserve_its_length() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    let component = class
        .instance_with(None, vec![json!("#1"), json!("#2"), json!("#3")])
        .unwrap();

    assert_eq!(component.children().len(), 3);
    assert_eq!(component.props()["children"], json!(["#1", "#2", "#3"]));
}

#[test]
fn given_no_children_should_have_an_empty_sequence() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    let component = class.instance().unwrap();

    assert!(component.children().is_empty());
}

#[test]
fn given_falsy_children_should_have_an_empty_sequence() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    for falsy in [Value::Null, json!(false), json!(0), json!("")] {
        let component = class.instance_with(None, falsy).unwrap();

        assert!(component.children().is_empty());
    }
}

#[test]
fn given_lazy_children_should_evaluate_them_on_instantiation() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    let component = class
        .instance_with(None, Children::lazy(|| json!(["lazy", "children"])))
        .unwrap();

    assert_eq!(component.children(), vec![json!("lazy"), json!("children")]);
}

#[test]
fn given_non_object_props_should_fail_without_mounting() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    for props in [json!([FILM]), json!(FILM), json!(1), json!(true)] {
        let result = class.instance_with(Some(props), Children::Absent);

        assert_eq!(
            result.err(),
            Some(ComponentError::InvalidArgument(InvalidArgument::InvalidProps))
        );
    }
    assert_eq!(test.host.mount_count(), 0);
}

#[test]
fn given_a_previous_instantiation_when_instantiated_without_props_should_reuse_its_props() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    class
        .instance_with(Some(json!({ "film": FILM })), json!("first child"))
        .unwrap();
    let second = class.instance().unwrap();

    assert_eq!(second.view(), json!(FILM));
    // Children come from the call itself, never from the previous one.
    assert!(second.children().is_empty());
}

#[test]
fn given_null_props_should_fall_back_to_the_previous_props() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(film_prop_view()).unwrap();

    class
        .instance_with(Some(json!({ "film": FILM })), Children::Absent)
        .unwrap();
    let second = class
        .instance_with(Some(Value::Null), Children::Absent)
        .unwrap();

    assert_eq!(second.view(), json!(FILM));
}

#[test]
fn given_two_instances_of_one_class_should_keep_independent_state() {
    let test = given_a_synchronous_spawner();
    let class = test.factory.create_component(movie_definition()).unwrap();

    let first = class
        .instance_with(Some(json!({ "film": FILM })), Children::Absent)
        .unwrap();
    let second = class
        .instance_with(Some(json!({ "film": "Porco Rosso" })), Children::Absent)
        .unwrap();

    first.controller().unwrap();
    second.controller().unwrap();

    assert_eq!(first.view(), json!(FILM));
    assert_eq!(second.view(), json!("Porco Rosso"));
}

#[test]
fn given_a_controller_run_with_props_should_remember_them_for_the_next_instance() {
    let test = given_a_synchronous_spawner();
    let class = test
        .factory
        .create_component(TestDefinition::new().view(|context| context.props()["film"].clone()))
        .unwrap();

    let first = class.instance().unwrap();
    first
        .controller_with(Some(json!({ "film": FILM })), Children::Absent)
        .unwrap();

    assert_eq!(class.instance().unwrap().view(), json!(FILM));
}
