//! Sort key lists: `expr [asc|ascending|desc|descending] {, ...}`.

use dynq_ir::TokenKind;

use crate::{OrderingKey, ParseError, Parser};

impl Parser<'_, '_> {
    pub(crate) fn parse_ordering_keys(&mut self) -> Result<Vec<OrderingKey>, ParseError> {
        let mut keys = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            let ascending = if self.cursor.check_word("asc") || self.cursor.check_word("ascending")
            {
                self.cursor.advance();
                true
            } else if self.cursor.check_word("desc") || self.cursor.check_word("descending") {
                self.cursor.advance();
                false
            } else {
                true
            };
            keys.push(OrderingKey { expr, ascending });
            if !self.cursor.check(TokenKind::Comma) {
                break;
            }
            self.cursor.advance();
        }
        self.expect_end()?;
        Ok(keys)
    }
}
