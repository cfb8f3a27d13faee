#![no_main]

use libfuzzer_sys::fuzz_target;
use sql_lowering::dialects::mysql::{tree, MySQLSelectFactory};
use sql_lowering::{Factory, SelectBody};

fuzz_target!(|data: &[u8]| {
    // Any tree serde accepts must lower or fail with an error, never panic
    if let Ok(stmt) = serde_json::from_slice::<tree::SelectStmt>(data) {
        if let Ok(body) = MySQLSelectFactory.generate(&stmt) {
            let json = body.to_json().expect("lowered AST serializes");
            let back = SelectBody::from_json(&json).expect("serialized AST deserializes");
            assert_eq!(back, body);
        }
    }
});
