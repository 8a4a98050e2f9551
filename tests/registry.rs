use anyhow::Result;
use ironquery::testing::*;
use ironquery::*;
use serde_json::{Value, json};

#[test]
fn registry_lists_every_operation() {
    let names: Vec<&str> = operations().iter().map(|op| op.name).collect();
    for expected in [
        "flatten", "chunk", "unzip", "zip", "sortBy", "sort", "limit", "join", "append", "reverse",
    ] {
        assert!(names.contains(&expected), "{expected} not registered");
    }
    assert_eq!(names.len(), OPERATIONS.len());
    assert!(lookup("sortBy").is_some());
    assert!(lookup("groupBy").is_none());
}

#[test]
fn unknown_operation_fails() -> Result<()> {
    let err = wrap_value(json!([1]))?.apply("explode", &[]).unwrap_err();
    assert_eq!(err, QueryError::UnknownOperation("explode".to_string()));
    Ok(())
}

#[test]
fn apply_chains_sequence_operations() -> Result<()> {
    let out = wrap_value(json!([[3, 1], 2, [5, 4]]))?
        .apply("flatten", &[])?
        .apply("sort", &[])?
        .apply("reverse", &[])?
        .apply("limit", &[3.into()])?
        .apply("append", &[json!("end").into()])?
        .to_vec();
    assert_collections_equal(&out, &[json!(5), json!(4), json!(3), json!("end")]);
    Ok(())
}

#[test]
fn apply_resets_context() -> Result<()> {
    let q = pairs_of(json!({"a": 1, "b": 2}))?.apply("reverse", &[])?;
    assert_all(q.tuples(), |t| t.context == Context::default());
    Ok(())
}

#[test]
fn sort_by_columns_and_selectors() -> Result<()> {
    let people = wrap(sample_people());

    let by_age = people
        .clone()
        .apply("sortBy", &["age".into()])?
        .map(|p| p["id"].clone())
        .to_vec();
    assert_eq!(by_age, vec![json!(5), json!(1), json!(2), json!(3), json!(4)]);

    let name_len = Selector::row(|p: &Value| p["name"].as_str().map_or(0, str::len));
    let by_len = people
        .apply("sortBy", &[name_len.into(), "id".into()])?
        .map(|p| p["name"].clone())
        .to_vec();
    assert_eq!(
        by_len,
        vec![json!("ada"), json!("alan"), json!("grace"), json!("edsger"), json!("barbara")]
    );
    Ok(())
}

#[test]
fn sort_by_rejects_numbers() -> Result<()> {
    let err = wrap_value(json!([1]))?.apply("sortBy", &[7.into()]).unwrap_err();
    assert!(matches!(
        err,
        QueryError::InvalidArgument { ref operation, .. } if operation == "sortBy"
    ));
    Ok(())
}

#[test]
fn unzip_and_zip_agree() -> Result<()> {
    let src = json!([["a", 1, true], ["b", 2]]);
    let unzipped = wrap_value(src.clone())?.apply("unzip", &[])?.to_vec();
    let zipped = wrap_value(src)?.apply("zip", &[])?.to_vec();
    assert_eq!(unzipped, zipped);
    assert_eq!(
        unzipped,
        vec![json!(["a", "b"]), json!([1, 2]), json!([true, null])]
    );
    Ok(())
}

#[test]
fn chunk_through_registry() -> Result<()> {
    let out = wrap_value(json!([1, 2, 3, 4, 5]))?
        .apply("chunk", &[2.into()])?
        .to_vec();
    assert_eq!(out, vec![json!([1, 2]), json!([3, 4]), json!([5])]);
    Ok(())
}

#[test]
fn join_through_registry() -> Result<()> {
    let out = wrap(sample_people())
        .apply(
            "join",
            &["id".into(), Value::Array(sample_orders()).into(), "person".into()],
        );
    assert!(matches!(out, Err(QueryError::Lookup { .. })));

    let ada = wrap(sample_people())
        .limit(1)
        .apply(
            "join",
            &["id".into(), sample_orders().into(), "person".into()],
        )?
        .to_vec();
    assert_eq!(ada.len(), 2);
    Ok(())
}

#[test]
fn join_argument_errors() {
    let err = wrap(sample_people()).apply("join", &["id".into()]).unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument { .. }));
}

#[test]
fn operation_functions_are_callable_directly() -> Result<()> {
    let op = lookup("reverse").ok_or_else(|| anyhow::anyhow!("reverse missing"))?;
    let out = (op.func)(vec![json!(1), json!(2)], &[])?;
    assert_eq!(out, vec![json!(2), json!(1)]);
    Ok(())
}
