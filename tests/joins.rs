use anyhow::Result;
use ironquery::testing::*;
use ironquery::*;
use serde_json::json;

#[test]
fn join_merges_matching_rows() -> Result<()> {
    let out = join(vec![json!({"a": 1})], "a", vec![json!({"b": 1, "x": "p"})], "b")?;
    assert_eq!(out, vec![json!({"b": 1, "x": "p", "a": 1})]);
    Ok(())
}

#[test]
fn join_fails_on_unmatched_left_row() {
    let err = join(vec![json!({"a": 9})], "a", vec![json!({"b": 1, "x": "p"})], "b").unwrap_err();
    assert_eq!(
        err,
        QueryError::Lookup {
            column: "a".to_string(),
            key: Key::from(9),
        }
    );
}

#[test]
fn join_left_fields_win() -> Result<()> {
    let out = join(
        vec![json!({"k": 1, "name": "left"})],
        "k",
        vec![json!({"k": 1, "name": "right", "extra": true})],
        "k",
    )?;
    assert_eq!(out, vec![json!({"k": 1, "name": "left", "extra": true})]);
    Ok(())
}

#[test]
fn join_emits_every_match_in_order() -> Result<()> {
    let people = sample_people().into_iter().filter(|p| p["id"] != json!(3));
    let out = join(people, "id", sample_orders(), "person")?;

    let orders: Vec<_> = out.iter().map(|r| r["order"].clone()).collect();
    assert_eq!(
        orders,
        vec![json!(100), json!(102), json!(101), json!(103), json!(104)]
    );
    assert_all(&out, |r| r["id"] == r["person"]);
    Ok(())
}

#[test]
fn join_strict_fails_for_person_without_orders() {
    let err = join(sample_people(), "id", sample_orders(), "person").unwrap_err();
    assert!(matches!(err, QueryError::Lookup { key, .. } if key == Key::from(3)));
}

#[test]
fn inner_join_skips_unmatched() -> Result<()> {
    let out = join_with(
        sample_people(),
        "id",
        sample_orders(),
        "person",
        &JoinConfig::inner(),
    )?;
    assert_eq!(out.len(), 5);
    assert_all(&out, |r| r["id"] != json!(3));
    Ok(())
}

#[test]
fn left_join_keeps_unmatched_row_alone() -> Result<()> {
    let cfg = JoinConfig {
        unmatched: Unmatched::Keep,
        ..Default::default()
    };
    let out = join_with(sample_people(), "id", sample_orders(), "person", &cfg)?;
    assert_eq!(out.len(), 6);
    assert_contains_row(&out, &json!({"id": 3, "name": "grace", "city": "new york"}));
    Ok(())
}

#[test]
fn right_precedence() -> Result<()> {
    let cfg = JoinConfig {
        precedence: Precedence::Right,
        ..JoinConfig::strict()
    };
    let out = join_with(
        vec![json!({"k": 1, "v": "l"})],
        "k",
        vec![json!({"k": 1, "v": "r"})],
        "k",
        &cfg,
    )?;
    assert_eq!(out[0]["v"], json!("r"));
    Ok(())
}

#[test]
fn chained_join() -> Result<()> {
    let names = wrap(sample_orders())
        .where_eq(&json!({"person": 1}))
        .join("person", sample_people(), "id")?
        .map(|r| {
            format!(
                "{}:{}",
                r["name"].as_str().unwrap_or("?"),
                r["item"].as_str().unwrap_or("?")
            )
        })
        .to_vec();
    assert_eq!(names, vec!["ada:lamp".to_string(), "ada:chair".to_string()]);
    Ok(())
}

#[test]
fn join_matches_numbers_by_value() -> Result<()> {
    let out = join(vec![json!({"a": 1.0})], "a", vec![json!({"b": 1})], "b")?;
    assert_eq!(out.len(), 1);
    Ok(())
}

#[test]
fn join_does_not_match_neighbouring_large_integers() {
    let err = join(
        vec![json!({"a": 9_007_199_254_740_993u64})],
        "a",
        vec![json!({"b": 9_007_199_254_740_992u64, "x": "wrong"})],
        "b",
    )
    .unwrap_err();
    assert_eq!(
        err,
        QueryError::Lookup {
            column: "a".to_string(),
            key: Key::from(9_007_199_254_740_993u64),
        }
    );
}

#[test]
fn join_matches_equal_large_integers() -> Result<()> {
    let out = join(
        vec![json!({"a": 9_007_199_254_740_993u64})],
        "a",
        vec![
            json!({"b": 9_007_199_254_740_992u64, "x": "wrong"}),
            json!({"b": 9_007_199_254_740_993u64, "x": "right"}),
        ],
        "b",
    )?;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["x"], json!("right"));
    Ok(())
}

fn assert_contains_row(rows: &[serde_json::Value], row: &serde_json::Value) {
    assert!(rows.contains(row), "row {row} missing from {rows:?}");
}
