use anyhow::Result;
use ironquery::testing::*;
use ironquery::*;
use serde_json::{Value, json};

#[test]
fn group_by_column_first_seen_order() {
    let rows = vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 1})];
    let groups = wrap(rows.clone()).group_by("a").groups();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].ordinal, 0);
    assert_eq!(groups[0].key, Key::from(1));
    assert_eq!(groups[0].members, vec![json!({"a": 1}), json!({"a": 1})]);
    assert_eq!(groups[1].ordinal, 1);
    assert_eq!(groups[1].key, Key::from(2));
    assert_eq!(groups[1].members, vec![json!({"a": 2})]);

    assert_group_partition(&rows, &groups);
    assert_first_seen_ordinals(&groups);
}

#[test]
fn group_by_missing_field_groups_under_null() {
    let rows = vec![json!({"a": 1}), json!({"b": 1}), json!({"a": null})];
    let groups = wrap(rows).group_by("a").groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].key, Key::Null);
    assert_eq!(groups[1].members.len(), 2);
}

#[test]
fn group_by_empty_input() {
    let groups = wrap(Vec::<Value>::new()).group_by("a").groups();
    assert!(groups.is_empty());
}

#[test]
fn grouped_query_stays_chainable() {
    let counts = wrap(sample_people())
        .group_by("city")
        .map(Vec::len)
        .from_pairs();
    assert_eq!(counts[&Key::from("london")], 2);
    assert_eq!(counts[&Key::from("manchester")], 1);
    assert_eq!(counts[&Key::from("new york")], 2);
}

#[test]
fn group_by_selector_function() {
    let adults = wrap(sample_people())
        .group_by(Selector::row(|p: &Value| p["age"].as_i64().map(|a| a >= 30)))
        .groups();
    let keys: Vec<Key> = adults.iter().map(|g| g.key.clone()).collect();
    assert_eq!(keys, vec![Key::from(true), Key::Null, Key::from(false)]);
}

#[test]
fn group_by_fn_sees_position() {
    let groups = wrap(vec!["a", "b", "c", "d", "e"])
        .group_by_fn(|_, _, pos| pos / 2)
        .groups();
    let members: Vec<Vec<&str>> = groups.into_iter().map(|g| g.members).collect();
    assert_eq!(members, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
}

#[test]
fn group_by_fn_sees_context() {
    let groups = pairs_of_map([("x", 1), ("y", 2), ("x2", 3)])
        .group_by_fn(|_, ctx, _| {
            ctx.key
                .as_ref()
                .and_then(Key::as_str)
                .map(|k| k.starts_with('x'))
        })
        .groups();
    assert_eq!(groups[0].members, vec![1, 3]);
    assert_eq!(groups[1].members, vec![2]);
}

#[test]
fn multi_key_grouping_is_order_insensitive() {
    let rows = sample_inventory();
    let by_kind_size = wrap(rows.clone()).group_by_columns(["kind", "size"]);
    let by_size_kind = wrap(rows.clone()).group_by_columns(["size", "kind"]);

    assert_eq!(by_kind_size, by_size_kind);
    assert_eq!(by_kind_size.len(), 4);
    assert_eq!(
        by_kind_size[0].key,
        Key::from(&json!({"kind": "shirt", "size": "m"}))
    );
    assert_eq!(by_kind_size[0].members.len(), 2);
    assert_eq!(
        by_kind_size[3].key.field("size"),
        Some(&Key::Null)
    );
    assert_group_partition(&rows, &by_kind_size);
    assert_first_seen_ordinals(&by_kind_size);
}

#[test]
fn multi_key_grouping_with_named_selectors() {
    let rows = sample_inventory();
    let groups = wrap(rows).group_by_columns([
        KeySpec::from("kind"),
        KeySpec::named([(
            "bulk",
            Selector::row(|r: &Value| r["qty"].as_i64().is_some_and(|q| q > 2)),
        )]),
    ]);
    let keys: Vec<Value> = groups.iter().map(|g| g.key.to_value()).collect();
    assert_eq!(
        keys,
        vec![
            json!({"bulk": true, "kind": "shirt"}),
            json!({"bulk": false, "kind": "shirt"}),
            json!({"bulk": true, "kind": "hat"}),
            json!({"bulk": false, "kind": "sock"}),
        ]
    );
}

#[test]
fn multi_key_groups_rewrap() -> Result<()> {
    let totals = wrap(sample_inventory().into_iter().filter(|r| r.get("size").is_some()))
        .group_by_columns(["kind"])
        .into_iter()
        .map(|g| (g.members.len(), g.key))
        .collect::<Vec<_>>();
    let q = wrap(totals).spread();
    let record = q.map(|n| json!(n)).from_pairs_record();
    assert_eq!(record[r#"{"kind":"shirt"}"#], json!(3));
    assert_eq!(record[r#"{"kind":"hat"}"#], json!(2));
    Ok(())
}
