//! Тесты полного цикла: текст → токены → AST

use super::common::{parse_ok, parse_syntax_err};
use db_cli::parser::{
    BinaryOperator, DataType, Expression, Projection, SqlParser, Statement, TokenKind,
};
use db_cli::{parse_sql, tokenize, Error};

#[test]
fn test_create_insert_select_session() {
    let create = parse_ok("CREATE TABLE users (id BIGINT, name TEXT, age INT);");
    let insert = parse_ok("INSERT INTO users VALUES (1, 'Ann', 34);");
    let select = parse_ok("SELECT name FROM users WHERE age > 30 LIMIT 5;");

    match create {
        Statement::CreateTable(stmt) => {
            assert_eq!(stmt.table_name, "users");
            assert_eq!(stmt.columns.len(), 3);
            assert_eq!(stmt.columns[0].data_type, DataType::BigInt);
        }
        other => panic!("Ожидался CREATE TABLE, получено {:?}", other),
    }

    match insert {
        Statement::Insert(stmt) => {
            assert_eq!(
                stmt.values,
                vec![
                    Expression::integer(1),
                    Expression::string("Ann"),
                    Expression::integer(34),
                ]
            );
        }
        other => panic!("Ожидался INSERT, получено {:?}", other),
    }

    match select {
        Statement::Select(stmt) => {
            assert_eq!(stmt.projections, Projection::Columns(vec!["name".into()]));
            assert_eq!(stmt.limit, Some(5));
            assert_eq!(
                stmt.selection.and_then(|e| e.operator()),
                Some(BinaryOperator::Greater)
            );
        }
        other => panic!("Ожидался SELECT, получено {:?}", other),
    }
}

#[test]
fn test_text_form_reparses_to_same_ast() {
    let queries = [
        "CREATE TABLE t (a INT, b BIGINT, c TEXT)",
        "insert into t values (-1, 'it''s', null, x)",
        "SELECT * FROM t",
        "SELECT a, b FROM t WHERE a = 1 OR b != 'x' AND (c < 2 OR d >= 3) LIMIT 4",
    ];

    for sql in queries {
        let first = parse_ok(sql);
        let rendered = first.to_string();
        let second = parse_ok(&rendered);
        assert_eq!(first, second, "text form: {}", rendered);
    }
}

#[test]
fn test_text_form_is_canonical() {
    let statement = parse_ok("select a from t where a = 1 or b = 2 and c = 'q''s' limit 3");
    assert_eq!(
        statement.to_string(),
        "SELECT a FROM t WHERE ((a = 1) OR ((b = 2) AND (c = 'q''s'))) LIMIT 3"
    );
}

#[test]
fn test_statements_from_spec_examples_fail_where_expected() {
    let (position, _) = parse_syntax_err("SELECT name users");
    assert_eq!(position, 12);

    let (_, message) = parse_syntax_err("CREATE TABLE t (a TIMESTAMP)");
    assert!(message.contains("Unsupported data type TIMESTAMP"));

    let sql = "INSERT INTO t VALUES (1, 2";
    let (position, _) = parse_syntax_err(sql);
    assert_eq!(position, sql.chars().count());
}

#[test]
fn test_tokens_can_be_reused_by_parser() {
    let sql = "SELECT id FROM users WHERE status = 'active'";
    let tokens = tokenize(sql).unwrap();

    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokens[5].kind, TokenKind::Identifier);

    let statement = SqlParser::from_tokens(sql, tokens.clone()).parse().unwrap();
    assert_eq!(statement, parse_ok(sql));

    // Поток токенов не изменяется парсером
    assert_eq!(tokens, tokenize(sql).unwrap());
}

#[test]
fn test_parsing_from_several_threads() {
    let sql = "SELECT a FROM t WHERE a = 1 AND b = 2 OR c = 3 LIMIT 9";
    let expected = parse_ok(sql);

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || parse_sql(sql).map_err(|e| e.to_string())))
        .collect();

    for handle in handles {
        let statement = handle.join().expect("поток парсера упал").unwrap();
        assert_eq!(statement, expected);
    }
}

#[test]
fn test_lex_error_has_offending_character() {
    match parse_sql("SELECT * FROM t WHERE a = 1 % 2") {
        Err(Error::Lex {
            position,
            character,
        }) => {
            assert_eq!(position, 28);
            assert_eq!(character, '%');
        }
        other => panic!("Ожидалась лексическая ошибка, получено {:?}", other),
    }
}
