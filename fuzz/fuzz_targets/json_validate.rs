#![no_main]
use futures_executor::block_on;
use libfuzzer_sys::fuzz_target;
use lift_schema::*;

fn lift() -> Schema {
    ObjectSchema::new()
        .field("exerciseId", StrSchema::new().len_range(1, 64).build())
        .field("weight", NumberSchema::new().range(0.0, 1000.0).build())
        .field("sets", NumberSchema::new().range(0.0, 100.0).integer(true).build())
        .field("reps", NumberSchema::new().range(0.0, 1000.0).integer(true).build())
        .field("tags", Schema::union([Schema::Absent, Schema::array_of(TypeMarker::String)]))
        .build()
}

fuzz_target!(|data: &[u8]| {
    let json: serde_json::Value = match serde_json::from_slice(data) {
        Ok(json) => json,
        Err(_) => return,
    };
    let value = Value::from(&json);

    let validator = compile(lift()).unwrap();
    let _ = block_on(validator.run(Some(&value), "body"));

    // Arbitrary JSON as a schema, checked against itself
    if let Ok(schema) = Schema::from_json(&json) {
        if let Ok(validator) = compile(schema) {
            let _ = block_on(validator.run(Some(&value), "body"));
        }
    }
});
