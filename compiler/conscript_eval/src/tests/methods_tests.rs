//! Property access and sequence-method tests.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use crate::{access_property, call_value, EvalContext, EvalSettings, Value, Vars};

fn ctx() -> EvalContext {
    EvalContext::new(&Vars::new(), Arc::new(EvalSettings::default()))
}

fn safe_nav_ctx() -> EvalContext {
    let settings = EvalSettings {
        safe_nav: true,
        ..EvalSettings::default()
    };
    EvalContext::new(&Vars::new(), Arc::new(settings))
}

#[track_caller]
fn get(receiver: &Value, prop: &str) -> Value {
    match access_property(receiver, prop, &ctx()) {
        Ok(v) => v,
        Err(e) => panic!("access `{prop}` failed: {e}"),
    }
}

fn sample_list() -> Value {
    Value::list(vec![Value::number(10.0), Value::number(20.0), Value::number(30.0)])
}

#[test]
fn test_object_own_keys_only() {
    let obj = Value::object(
        [
            ("key".to_string(), Value::string("value")),
            ("length".to_string(), Value::number(7.0)),
        ]
        .into_iter()
        .collect(),
    );
    assert_eq!(get(&obj, "key"), Value::string("value"));
    // `length` on an object is just a key, never derived.
    assert_eq!(get(&obj, "length"), Value::number(7.0));
    assert_eq!(get(&obj, "missing"), Value::Null);
}

#[test]
fn test_object_nan_value_normalises_to_null() {
    let obj = Value::object([("n".to_string(), Value::Number(f64::NAN))].into_iter().collect());
    assert_eq!(get(&obj, "n"), Value::Null);
}

#[test]
fn test_list_indexing() {
    let list = sample_list();
    assert_eq!(get(&list, "0"), Value::number(10.0));
    assert_eq!(get(&list, "2"), Value::number(30.0));
    assert_eq!(get(&list, "3"), Value::Null);
    assert_eq!(get(&list, "-1"), Value::Null);
}

#[test]
fn test_string_as_character_array() {
    let s = Value::string("héllo");
    assert_eq!(get(&s, "1"), Value::string("é"));
    assert_eq!(get(&s, "length"), Value::number(5.0));
    assert_eq!(get(&s, "last"), Value::string("o"));
    assert_eq!(get(&s, "empty"), Value::Bool(false));
}

#[test]
fn test_derived_names() {
    assert_eq!(get(&Value::list(vec![]), "empty"), Value::Bool(true));
    assert_eq!(get(&Value::list(vec![Value::number(1.0)]), "multiple"), Value::Bool(false));
    assert_eq!(get(&sample_list(), "multiple"), Value::Bool(true));
    assert_eq!(get(&sample_list(), "count"), Value::number(3.0));
    assert_eq!(get(&Value::list(vec![]), "last"), Value::Null);
}

#[test]
fn test_unknown_property_raises() {
    assert!(access_property(&sample_list(), "middle", &ctx()).is_err());
    assert_eq!(
        access_property(&sample_list(), "middle", &safe_nav_ctx()).ok(),
        Some(Value::Null)
    );
}

#[test]
fn test_non_object_receiver() {
    assert!(access_property(&Value::number(5.0), "x", &ctx()).is_err());
    assert!(access_property(&Value::Null, "x", &ctx()).is_err());
    assert_eq!(
        access_property(&Value::Null, "x", &safe_nav_ctx()).ok(),
        Some(Value::Null)
    );
    // A NaN receiver navigates like null.
    assert!(access_property(&Value::Number(f64::NAN), "x", &ctx()).is_err());
}

#[test]
fn test_every_and_some() {
    let list = sample_list();
    let every = get(&list, "every");
    let positive = Value::native_fn("positive", |args, _| {
        Ok(Value::Bool(matches!(args.first(), Some(Value::Number(n)) if *n > 0.0)))
    });
    let verdict = match call_value(&every, &[positive.clone()], &ctx()) {
        Ok(v) => v,
        Err(e) => panic!("every failed: {e}"),
    };
    assert_eq!(verdict, Value::Bool(true));

    let some = get(&list, "some");
    let over_25 = Value::native_fn("over25", |args, _| {
        Ok(Value::Bool(matches!(args.first(), Some(Value::Number(n)) if *n > 25.0)))
    });
    let verdict = match call_value(&some, &[over_25], &ctx()) {
        Ok(v) => v,
        Err(e) => panic!("some failed: {e}"),
    };
    assert_eq!(verdict, Value::Bool(true));
}

#[test]
fn test_every_on_empty_list_is_true() {
    let every = get(&Value::list(vec![]), "every");
    let never = Value::native_fn("never", |_, _| Ok(Value::Bool(false)));
    assert_eq!(call_value(&every, &[never], &ctx()).ok(), Some(Value::Bool(true)));
}

#[test]
fn test_map() {
    let map = get(&sample_list(), "map");
    let double = Value::native_fn("double", |args, _| match args.first() {
        Some(Value::Number(n)) => Ok(Value::number(n * 2.0)),
        _ => Ok(Value::Null),
    });
    let mapped = match call_value(&map, &[double], &ctx()) {
        Ok(v) => v,
        Err(e) => panic!("map failed: {e}"),
    };
    assert_eq!(
        mapped,
        Value::list(vec![Value::number(20.0), Value::number(40.0), Value::number(60.0)])
    );
}

#[test]
fn test_map_requires_a_function() {
    let map = get(&sample_list(), "map");
    assert!(call_value(&map, &[Value::number(1.0)], &ctx()).is_err());
}

#[test]
fn test_slice() {
    let slice = get(&sample_list(), "slice");
    let tail = call_value(&slice, &[Value::number(1.0)], &ctx()).ok();
    assert_eq!(
        tail,
        Some(Value::list(vec![Value::number(20.0), Value::number(30.0)]))
    );
    let middle = call_value(&slice, &[Value::number(1.0), Value::number(2.0)], &ctx()).ok();
    assert_eq!(middle, Some(Value::list(vec![Value::number(20.0)])));
    // Negative indices count from the end.
    let last = call_value(&slice, &[Value::number(-1.0)], &ctx()).ok();
    assert_eq!(last, Some(Value::list(vec![Value::number(30.0)])));

    let str_slice = get(&Value::string("conscript"), "slice");
    let prefix = call_value(&str_slice, &[Value::number(0.0), Value::number(3.0)], &ctx()).ok();
    assert_eq!(prefix, Some(Value::string("con")));
}

#[test]
fn test_pop_and_shift() {
    let pop = get(&sample_list(), "pop");
    assert_eq!(
        call_value(&pop, &[], &ctx()).ok(),
        Some(Value::list(vec![Value::number(10.0), Value::number(20.0)]))
    );
    assert_eq!(
        call_value(&pop, &[Value::number(2.0)], &ctx()).ok(),
        Some(Value::list(vec![Value::number(10.0)]))
    );

    let shift = get(&sample_list(), "shift");
    assert_eq!(
        call_value(&shift, &[Value::number(2.0)], &ctx()).ok(),
        Some(Value::list(vec![Value::number(30.0)]))
    );
    // Oversized counts clamp.
    assert_eq!(
        call_value(&shift, &[Value::number(99.0)], &ctx()).ok(),
        Some(Value::list(vec![]))
    );
}

#[test]
fn test_pop_handler_observes_removed_elements() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = Value::native_fn("observer", move |args, _| {
        if let Ok(mut guard) = sink.lock() {
            guard.extend(args.iter().cloned());
        }
        Ok(Value::Null)
    });
    let pop = get(&sample_list(), "pop");
    let kept = call_value(&pop, &[Value::number(2.0), handler], &ctx()).ok();
    assert_eq!(kept, Some(Value::list(vec![Value::number(10.0)])));
    let observed = match seen.lock() {
        Ok(guard) => guard.clone(),
        Err(e) => panic!("lock poisoned: {e}"),
    };
    assert_eq!(
        observed,
        vec![Value::list(vec![Value::number(20.0), Value::number(30.0)])]
    );
}

#[test]
fn test_call_of_non_function() {
    assert!(call_value(&Value::number(1.0), &[], &ctx()).is_err());
    let settings = EvalSettings {
        safe_call: true,
        ..EvalSettings::default()
    };
    let safe = EvalContext::new(&Vars::new(), Arc::new(settings));
    assert_eq!(call_value(&Value::number(1.0), &[], &safe).ok(), Some(Value::Null));
}
