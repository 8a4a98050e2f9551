//! Small JSON row sets for grouping, indexing and join tests.

use serde_json::{Value, json};

/// People with a unique `id`, a repeated `city` and an optional `age`.
///
/// ```
/// use ironquery::testing::sample_people;
///
/// let people = sample_people();
/// assert_eq!(people.len(), 5);
/// ```
#[must_use]
pub fn sample_people() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "ada", "city": "london", "age": 36}),
        json!({"id": 2, "name": "alan", "city": "manchester", "age": 41}),
        json!({"id": 3, "name": "grace", "city": "new york"}),
        json!({"id": 4, "name": "edsger", "city": "london", "age": null}),
        json!({"id": 5, "name": "barbara", "city": "new york", "age": 29}),
    ]
}

/// Orders referencing [`sample_people`] through `person`; person 3 has none
/// and person 1 has two.
#[must_use]
pub fn sample_orders() -> Vec<Value> {
    vec![
        json!({"order": 100, "person": 1, "item": "lamp"}),
        json!({"order": 101, "person": 2, "item": "desk"}),
        json!({"order": 102, "person": 1, "item": "chair"}),
        json!({"order": 103, "person": 4, "item": "pen"}),
        json!({"order": 104, "person": 5, "item": "ink"}),
    ]
}

/// Rows sharing `kind` and `size` in several combinations, for multi-key
/// grouping.
#[must_use]
pub fn sample_inventory() -> Vec<Value> {
    vec![
        json!({"sku": "a1", "kind": "shirt", "size": "m", "qty": 3}),
        json!({"sku": "a2", "kind": "shirt", "size": "l", "qty": 1}),
        json!({"sku": "b1", "kind": "hat", "size": "m", "qty": 7}),
        json!({"sku": "a3", "kind": "shirt", "size": "m", "qty": 2}),
        json!({"sku": "b2", "kind": "hat", "size": "m", "qty": 4}),
        json!({"sku": "c1", "kind": "sock"}),
    ]
}

/// Values of mixed JSON kinds, including nulls, for sorting and `exists`.
#[must_use]
pub fn mixed_values() -> Vec<Value> {
    vec![
        json!(3),
        Value::Null,
        json!("b"),
        json!(1.5),
        json!(true),
        json!("a"),
        json!([1, 2]),
    ]
}
