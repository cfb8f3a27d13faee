#![no_main]

use libfuzzer_sys::fuzz_target;
use sql_lowering::dialects::oracle::{tree, OracleExpressionFactory, OracleSelectFactory};
use sql_lowering::Factory;

fuzz_target!(|data: &[u8]| {
    // Expressions and whole queries both come through serde
    if let Ok(expr) = serde_json::from_slice::<tree::Expr>(data) {
        let _ = OracleExpressionFactory.generate(&expr);
    }
    if let Ok(stmt) = serde_json::from_slice::<tree::SelectStmt>(data) {
        let _ = OracleSelectFactory.generate(&stmt);
    }
});
