//! Грамматика выражений
//!
//! ```text
//! expr        := or_expr
//! or_expr     := and_expr (OR and_expr)*
//! and_expr    := comparison (AND comparison)*
//! comparison  := primary [comp_op primary]
//! primary     := NUMBER | STRING | NULL | identifier | '(' expr ')'
//! ```
//!
//! Приоритет от низшего к высшему: OR, AND, сравнение, первичное выражение.
//! Сравнения не цепляются: второй оператор подряд остаётся внешнему правилу.

use crate::common::Result;
use crate::parser::ast::{BinaryOperator, Expression};
use crate::parser::parser::SqlParser;
use crate::parser::token::TokenKind;

impl<'a> SqlParser<'a> {
    /// Парсит выражение
    pub(crate) fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.check_keyword("OR") {
            self.advance();
            let right = self.parse_and()?;
            left = Expression::binary(left, BinaryOperator::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_comparison()?;
        while self.check_keyword("AND") {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expression::binary(left, BinaryOperator::And, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let left = self.parse_primary()?;

        let operator = match self.current().kind {
            TokenKind::Operator => BinaryOperator::comparison(&self.current().text),
            _ => None,
        };

        match operator {
            Some(operator) => {
                self.advance();
                let right = self.parse_primary()?;
                Ok(Expression::binary(left, operator, right))
            }
            None => Ok(left),
        }
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = self.current();
        match token.kind {
            TokenKind::Number => {
                let value = token
                    .text
                    .parse::<i64>()
                    .map_err(|_| self.error(format!("Invalid integer literal {}", token.text)))?;
                self.advance();
                Ok(Expression::integer(value))
            }
            TokenKind::String => {
                let value = token.string_value();
                self.advance();
                Ok(Expression::string(value))
            }
            TokenKind::Keyword if token.text == "NULL" => {
                self.advance();
                Ok(Expression::null())
            }
            TokenKind::Identifier => {
                let name = self.advance().text;
                Ok(Expression::column(name))
            }
            TokenKind::Delimiter if token.text == "(" => {
                self.enter_group()?;
                self.advance();
                let inner = self.parse_expression();
                self.leave_group();
                let inner = inner?;
                self.expect(TokenKind::Delimiter, ")")?;
                Ok(inner)
            }
            _ => Err(self.error(format!(
                "Expected expression, found {}",
                token.describe()
            ))),
        }
    }
}
