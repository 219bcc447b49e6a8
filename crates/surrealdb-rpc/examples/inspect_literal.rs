//! Parses table and record literals and shows how they go over the wire.
//!
//! ```text
//! cargo run --example inspect_literal -- 'person:⟨tobie-h⟩' 'test:{foo:"bar"}' '⟨a:b⟩'
//! ```

use surrealdb_rpc::codec::encode_scalar;
use surrealdb_rpc::{Scalar, Thing};

fn describe(thing: &Thing) -> String {
    match thing {
        Thing::Table(table) => format!("table {}", table.raw_name()),
        Thing::Record(record) => format!(
            "record in {} ({:?} id {:?})",
            record.table().raw_name(),
            record.kind(),
            record.id()
        ),
    }
}

fn main() {
    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        eprintln!("usage: inspect_literal <literal>...");
        std::process::exit(2);
    }

    let mut failed = false;
    for input in &inputs {
        println!("\n=== {} ===", input);
        match Thing::parse(input) {
            Ok(thing) => {
                let payload = encode_scalar(&Scalar::Thing(thing.clone()));
                println!("Kind:     {}", describe(&thing));
                println!("Literal:  {}", thing.literal());
                println!(
                    "Payload:  tag {} / {} bytes / {}",
                    payload.tag,
                    payload.data.len(),
                    String::from_utf8_lossy(&payload.data)
                );
            }
            Err(e) => {
                println!("Error:    {}", e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
