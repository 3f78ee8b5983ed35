use anyhow::{anyhow, Result};
use reefql::query::parser::ast::{Comparison, Direction, Projection, Statement, Value};
use reefql::query::parser::{LexError, ParseError, Parser};

fn parse_batch(sql: &str) -> Result<Vec<Statement>> {
    let batch = Parser::new(sql)
        .map_err(|e| anyhow!("lex error: {e}"))?
        .parse_batch()
        .map_err(|e| anyhow!("parse error: {e}"))?;
    Ok(batch.statements)
}

#[test]
fn test_select_star() -> Result<()> {
    let statements = parse_batch("SELECT * FROM person")?;
    assert_eq!(statements.len(), 1);

    if let Statement::Select(select) = &statements[0] {
        assert_eq!(select.table, "person");
        assert_eq!(select.projection, Projection::All);
        assert!(select.filter.is_none());
        assert!(select.order_by.is_none());
    } else {
        panic!("Expected SELECT statement");
    }

    Ok(())
}

#[test]
fn test_single_column_shorthand() -> Result<()> {
    // A bare column and a parenthesized single-element list are the same AST
    let bare = parse_batch("SELECT id FROM person")?;
    let parenthesized = parse_batch("SELECT (id) FROM person")?;
    assert_eq!(bare, parenthesized);

    Ok(())
}

#[test]
fn test_conjunction_filter_in_source_order() -> Result<()> {
    let statements =
        parse_batch("SELECT * FROM person WHERE id = 1 AND name = 'Joe' AND authority = 'Joe'")?;

    if let Statement::Select(select) = &statements[0] {
        let filter = select.filter.as_ref().expect("Expected WHERE clause");
        assert_eq!(
            filter.0,
            vec![
                Comparison {
                    column: "id".to_string(),
                    value: Value::Integer(1),
                },
                Comparison {
                    column: "name".to_string(),
                    value: Value::String("Joe".to_string()),
                },
                Comparison {
                    column: "authority".to_string(),
                    value: Value::String("Joe".to_string()),
                },
            ]
        );
    } else {
        panic!("Expected SELECT statement");
    }

    Ok(())
}

#[test]
fn test_disjunction_never_accepted() {
    assert!(parse_batch("SELECT * FROM person WHERE id = 1 OR id = 2").is_err());
    assert!(parse_batch("SELECT * FROM person WHERE (id = 1 OR id = 2)").is_err());
}

#[test]
fn test_order_by_defaults_and_directions() -> Result<()> {
    let statements = parse_batch("SELECT * FROM person ORDER BY id DESC, name")?;

    if let Statement::Select(select) = &statements[0] {
        let order_by = select.order_by.as_ref().expect("Expected ORDER BY");
        assert_eq!(order_by.len(), 2);
        assert_eq!(order_by[0].column, "id");
        assert_eq!(order_by[0].direction, Direction::Desc);
        assert_eq!(order_by[1].column, "name");
        assert_eq!(order_by[1].direction, Direction::Asc);
    } else {
        panic!("Expected SELECT statement");
    }

    Ok(())
}

#[test]
fn test_multi_row_insert() -> Result<()> {
    let statements = parse_batch("INSERT INTO person VALUES ('Paul', 'none'), ('John', 'none')")?;

    if let Statement::Insert(insert) = &statements[0] {
        assert_eq!(insert.table, "person");
        assert!(insert.columns.is_none());
        assert_eq!(insert.rows.len(), 2);
        assert!(insert.rows.iter().all(|row| row.len() == 2));
    } else {
        panic!("Expected INSERT statement");
    }

    Ok(())
}

#[test]
fn test_batch_isolation() -> Result<()> {
    let statements = parse_batch("SELECT id, name FROM person; SELECT id, name from heroes")?;

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].table_name(), "person");
    assert_eq!(statements[1].table_name(), "heroes");
    for statement in &statements {
        assert!(matches!(statement, Statement::Select(_)));
    }

    Ok(())
}

#[test]
fn test_update_and_delete() -> Result<()> {
    let statements = parse_batch(
        "UPDATE person SET name = 'Paul', authority = 'none' WHERE id = 1; \
         DELETE FROM person WHERE name = 'Joe'",
    )?;

    if let Statement::Update(update) = &statements[0] {
        assert_eq!(update.assignments.len(), 2);
        assert_eq!(update.assignments[0].column, "name");
        assert!(update.filter.is_some());
    } else {
        panic!("Expected UPDATE statement");
    }

    if let Statement::Delete(delete) = &statements[1] {
        assert_eq!(delete.table, "person");
        assert_eq!(delete.filter.as_ref().unwrap().0.len(), 1);
    } else {
        panic!("Expected DELETE statement");
    }

    Ok(())
}

#[test]
fn test_lex_error_aborts_whole_batch() {
    // The failing literal is in the second statement, but nothing is parsed
    let result = Parser::new("SELECT * FROM person; SELECT * FROM person WHERE name = 'Joe");
    assert!(matches!(
        result,
        Err(ParseError::Lex(LexError::UnterminatedString(_)))
    ));
}

#[test]
fn test_syntax_errors() {
    // Misspelled keyword
    assert!(parse_batch("SELCT id FROM person").is_err());
    // Missing FROM
    assert!(parse_batch("SELECT * person").is_err());
    // Empty batch
    assert!(matches!(
        Parser::new(";;").unwrap().parse_batch(),
        Err(ParseError::EmptyBatch)
    ));
    // Aggregates are not part of the dialect
    assert!(parse_batch("SELECT COUNT(*) FROM person").is_err());
}
