// Schema Validation Integration Tests
//
// This module tests statement validation against a schema and the
// parse-then-validate pipeline that produces query descriptors.

use anyhow::{anyhow, Result};
use reefql::query::parser::ast::Statement;
use reefql::{
    process, BatchValidationError, Column, DataType, QueryError, Schema, SchemaError,
    SchemaValidator, Table, ValidationOptions,
};

/// A two-table schema in the shape an IDL-loading collaborator would supply:
/// `person` has a store-assigned primary key, `heroes` does not.
fn test_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_table(Table::new(
        "person".to_string(),
        vec![
            Column::new("id".to_string(), DataType::Integer, true, true),
            Column::new("name".to_string(), DataType::Text, false, false),
            Column::new("authority".to_string(), DataType::Text, false, false),
        ],
    ));
    schema.add_table(Table::new(
        "heroes".to_string(),
        vec![
            Column::new("id".to_string(), DataType::Integer, true, false),
            Column::new("name".to_string(), DataType::Text, false, false),
        ],
    ));
    schema
}

#[test]
fn test_descriptor_batch() -> Result<()> {
    let schema = test_schema();
    let descriptors = process(
        "SELECT id, name FROM person; SELECT id, name from heroes",
        &schema,
        ValidationOptions::default(),
    )
    .map_err(|e| anyhow!("{e}"))?;

    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].table_name(), "person");
    assert_eq!(descriptors[1].table_name(), "heroes");
    assert!(matches!(descriptors[0].statement(), Statement::Select(_)));
    // The bound table travels with the descriptor
    assert_eq!(descriptors[1].table().columns().len(), 2);
    assert_eq!(descriptors[0].dump_sql(), "SELECT (id, name) FROM person");

    Ok(())
}

#[test]
fn test_unknown_table_and_column() {
    let schema = test_schema();

    let err = process("SELECT * FROM villains", &schema, ValidationOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        QueryError::Schema(BatchValidationError {
            error: SchemaError::UnknownTable(ref t),
            ..
        }) if t == "villains"
    ));

    let err = process(
        "SELECT * FROM heroes WHERE authority = 'none'",
        &schema,
        ValidationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Schema(BatchValidationError {
            error: SchemaError::UnknownColumn { ref column, .. },
            ..
        }) if column == "authority"
    ));
}

#[test]
fn test_insert_arity_mismatch() {
    let schema = test_schema();

    let err = process(
        "INSERT INTO person (id, name, authority) VALUES (3, 'Paul')",
        &schema,
        ValidationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Schema(BatchValidationError {
            error: SchemaError::ArityMismatch {
                expected: 3,
                found: 2,
                ..
            },
            ..
        })
    ));
}

#[test]
fn test_auto_generated_column_rejected_by_default() {
    let schema = test_schema();

    let err = process(
        "INSERT INTO person (id, name, authority) VALUES (3, 'Paul', 'none')",
        &schema,
        ValidationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Schema(BatchValidationError {
            error: SchemaError::AutoGeneratedColumnWrite { ref column, .. },
            ..
        }) if column == "id"
    ));

    // Positional full-arity tuples breach the policy the same way
    let err = process(
        "INSERT INTO person VALUES (3, 'Paul', 'none')",
        &schema,
        ValidationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Schema(BatchValidationError {
            error: SchemaError::AutoGeneratedColumnWrite { .. },
            ..
        })
    ));
}

#[test]
fn test_implicit_insert_maps_to_writable_columns() -> Result<()> {
    let schema = test_schema();

    // person.id is store-assigned, so two values fill (name, authority)
    let descriptors = process(
        "INSERT INTO person VALUES ('Paul', 'none'), ('John', 'none')",
        &schema,
        ValidationOptions::default(),
    )
    .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(descriptors.len(), 1);

    // heroes has no store-assigned column, so full arity is required
    let descriptors = process(
        "INSERT INTO heroes VALUES (7, 'Kara')",
        &schema,
        ValidationOptions::default(),
    )
    .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(descriptors[0].table_name(), "heroes");

    Ok(())
}

#[test]
fn test_permissive_policy_is_opt_in() -> Result<()> {
    let schema = test_schema();
    let permissive = ValidationOptions {
        allow_auto_generated_writes: true,
    };

    let descriptors = process(
        "INSERT INTO person (id, name, authority) VALUES (3, 'Paul', 'none'); \
         UPDATE person SET id = 4 WHERE name = 'Paul'",
        &schema,
        permissive,
    )
    .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(descriptors.len(), 2);

    Ok(())
}

#[test]
fn test_update_and_delete_validation() {
    let schema = test_schema();
    let validator = SchemaValidator::new(&schema);

    let batch = reefql::Parser::new(
        "UPDATE person SET name = 'Paul', name = 'John'; DELETE FROM person WHERE id = 1",
    )
    .unwrap()
    .parse_batch()
    .unwrap();

    // Validation stops at the first failing statement
    let err = validator.validate_batch(&batch).unwrap_err();
    assert_eq!(err.statement, 0);
    assert!(matches!(
        err.error,
        SchemaError::DuplicateAssignmentColumn { ref column, .. } if column == "name"
    ));

    // The DELETE on its own is fine
    let descriptor = validator.validate(&batch.statements[1]).unwrap();
    assert_eq!(descriptor.dump_sql(), "DELETE FROM person WHERE id = 1");
}

#[test]
fn test_schema_error_names_the_failing_statement() {
    let schema = test_schema();

    let err = process(
        "SELECT * FROM person; SELECT * FROM person WHERE ghost = 1; DELETE FROM person",
        &schema,
        ValidationOptions::default(),
    )
    .unwrap_err();

    let QueryError::Schema(batch_err) = err else {
        panic!("expected a schema error, got {err:?}");
    };
    assert_eq!(batch_err.statement, 1);
    assert!(matches!(
        batch_err.error,
        SchemaError::UnknownColumn { ref column, .. } if column == "ghost"
    ));
    // The position survives into the rendered diagnostic
    assert!(batch_err.to_string().starts_with("statement 1:"));
}

#[test]
fn test_schema_crosses_a_serde_boundary() -> Result<()> {
    let schema = test_schema();

    let json = serde_json::to_string(&schema)?;
    let reloaded: Schema = serde_json::from_str(&json)?;

    // The reloaded schema validates exactly like the original
    let descriptors = process(
        "SELECT * FROM person WHERE name = 'Joe' ORDER BY name ASC",
        &reloaded,
        ValidationOptions::default(),
    )
    .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(descriptors[0].table_name(), "person");

    let err = process(
        "UPDATE person SET id = 9",
        &reloaded,
        ValidationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Schema(BatchValidationError {
            error: SchemaError::AutoGeneratedColumnWrite { .. },
            ..
        })
    ));

    Ok(())
}
