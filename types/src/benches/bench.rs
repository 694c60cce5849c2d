use criterion::criterion_main;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sigma_types::{SType, Value};


criterion_main!(encode::benches, decode::benches);

/// Build a `Coll[(Long, Coll[Byte])]` with `items` random entries.
fn sample(items: usize) -> Value {
    let mut rng = StdRng::seed_from_u64(0);
    let entries = (0..items)
        .map(|_| {
            let bytes = (0..32).map(|_| Value::Byte(rng.gen())).collect();
            Value::pair(
                Value::Long(rng.gen()),
                Value::coll(SType::BYTE, bytes).unwrap(),
            )
            .unwrap()
        })
        .collect();
    Value::coll(SType::pair(SType::LONG, SType::coll(SType::BYTE)), entries).unwrap()
}
