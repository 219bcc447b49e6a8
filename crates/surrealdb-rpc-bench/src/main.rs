//! Throughput benchmark for record literals and the extension codec.
//!
//! ```text
//! surrealdb-rpc-bench [fixture.json] [count]
//! ```
//!
//! The fixture is a JSON array of `{"table": ..., "id": ...}` objects. Without
//! one, a synthetic set covering every id kind is generated from a fixed seed.

use std::fs;
use std::str::FromStr;
use std::time::{Duration, Instant};

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use surrealdb_rpc::codec::{decode_scalar, encode_scalar};
use surrealdb_rpc::{IdKind, Object, RecordId, Scalar, Thing, Value};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 100_000;
const ITERS: u32 = 5;

// =============================================================================
// FIXTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct Fixture {
    table: String,
    id: serde_json::Value,
}

fn load_fixture(path: &str) -> Vec<RecordId> {
    let json = fs::read_to_string(path).expect("Failed to read fixture");
    let fixtures: Vec<Fixture> = serde_json::from_str(&json).expect("Failed to parse fixture");

    let mut skipped = 0;
    let records: Vec<RecordId> = fixtures
        .into_iter()
        .filter_map(|f| match RecordId::new(f.table.as_str(), Value::from(f.id)) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(table = %f.table, error = %e, "skipping fixture entry");
                skipped += 1;
                None
            }
        })
        .collect();

    println!("Loaded {} records from {} ({} skipped)", records.len(), path, skipped);
    records
}

fn synthetic(count: usize) -> Vec<RecordId> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let tables = ["person", "order-line", "audit log", "metrics"];

    (0..count)
        .map(|i| {
            let table = tables[i % tables.len()];
            let result = match i % 5 {
                0 => Ok(RecordId::random_with(table, &mut rng)),
                1 => RecordId::new(table, rng.gen_range(0..i64::MAX)),
                2 => RecordId::new(table, format!("user-{i}@example.com")),
                3 => RecordId::new(
                    table,
                    vec![Value::from("eu-west"), Value::Int(i as i64), Value::from("x y")],
                ),
                _ => RecordId::new(
                    table,
                    Object::new()
                        .with("tenant", format!("t{}", i % 17))
                        .with("seq", i as i64)
                        .with("tags", vec!["a", "b-c"]),
                ),
            };
            result.expect("Synthetic id should be valid")
        })
        .collect()
}

// =============================================================================
// MEASUREMENT
// =============================================================================

fn measure<T>(label: &str, count: usize, mut f: impl FnMut() -> T) -> T {
    // Warmup
    let _ = f();

    let start = Instant::now();
    let mut out = None;
    for _ in 0..ITERS {
        out = Some(f());
    }
    let elapsed = start.elapsed() / ITERS;

    println!(
        "{:<28} {:>10.2?}  ({:.2} M/s)",
        label,
        elapsed,
        count as f64 / 1_000_000.0 / elapsed.as_secs_f64()
    );
    out.expect("ITERS is non-zero")
}

fn scalar_mix(count: usize) -> Vec<Scalar> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("Valid base timestamp");
    (0..count)
        .map(|i| match i % 5 {
            0 => Scalar::Uuid(uuid::Uuid::from_u128(i as u128)),
            1 => Scalar::Decimal(
                BigDecimal::from_str(&format!("{i}.{:04}", i % 10_000)).expect("Valid decimal"),
            ),
            2 => Scalar::Duration(Duration::from_micros(i as u64 * 1_234_567)),
            3 => Scalar::DateTime(base + chrono::Duration::seconds(i as i64)),
            _ => Scalar::Null,
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let count = args
        .get(2)
        .map(|n| n.parse().expect("count must be a number"))
        .unwrap_or(DEFAULT_COUNT);

    let records = match args.get(1).filter(|p| p.as_str() != "-") {
        Some(path) => load_fixture(path),
        None => synthetic(count),
    };
    assert!(!records.is_empty(), "No records to benchmark");

    let mut kinds = [0usize; 4];
    for record in &records {
        let slot = match record.kind() {
            IdKind::Text => 0,
            IdKind::Numeric => 1,
            IdKind::Array => 2,
            IdKind::Object => 3,
        };
        kinds[slot] += 1;
    }
    println!(
        "{} records: {} text, {} numeric, {} array, {} object\n",
        records.len(),
        kinds[0],
        kinds[1],
        kinds[2],
        kinds[3]
    );

    // Literal formatting
    let literals = measure("literal()", records.len(), || {
        records.iter().map(RecordId::literal).collect::<Vec<_>>()
    });
    let literal_bytes: usize = literals.iter().map(String::len).sum();
    println!("  {} bytes of literal text", literal_bytes);

    // Parsing
    let parsed = measure("Thing::parse", records.len(), || {
        literals
            .iter()
            .map(|l| Thing::parse(l).expect("Failed to parse literal"))
            .collect::<Vec<_>>()
    });
    for (record, thing) in records.iter().zip(&parsed) {
        assert_eq!(
            thing.record_id(),
            Some(record),
            "literal {} did not round-trip",
            record.literal()
        );
    }

    // Extension codec, things
    let things: Vec<Scalar> = records.iter().cloned().map(|r| Scalar::Thing(r.into())).collect();
    let payloads = measure("encode_scalar (thing)", things.len(), || {
        things.iter().map(encode_scalar).collect::<Vec<_>>()
    });
    let decoded = measure("decode_scalar (thing)", payloads.len(), || {
        payloads
            .iter()
            .map(|p| decode_scalar(p.tag, &p.data).expect("Failed to decode"))
            .collect::<Vec<_>>()
    });
    assert_eq!(decoded, things, "thing payloads did not round-trip");

    // Extension codec, other scalars
    let scalars = scalar_mix(records.len());
    let payloads = measure("encode_scalar (mixed)", scalars.len(), || {
        scalars.iter().map(encode_scalar).collect::<Vec<_>>()
    });
    let decoded = measure("decode_scalar (mixed)", payloads.len(), || {
        payloads
            .iter()
            .map(|p| decode_scalar(p.tag, &p.data).expect("Failed to decode"))
            .collect::<Vec<_>>()
    });
    assert_eq!(decoded, scalars, "scalar payloads did not round-trip");

    let payload_bytes: usize = payloads.iter().map(|p| p.data.len()).sum();
    println!("\n=== Summary ===");
    println!("Records: {}", records.len());
    println!(
        "Literal text: {} bytes ({:.1} bytes/record)",
        literal_bytes,
        literal_bytes as f64 / records.len() as f64
    );
    println!(
        "Mixed scalar payloads: {} bytes ({:.1} bytes/value)",
        payload_bytes,
        payload_bytes as f64 / scalars.len() as f64
    );
}
