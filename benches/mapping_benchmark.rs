use chrono::{FixedOffset, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crs_connector::{mapper, Credentials, Operation, ParameterMap, RequestContext, Target};
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde_json::{json, Value};

const GIVEN_NAMES: [&str; 6] = ["Ann", "Bela", "Chen", "Dora", "Emil", "Fatima"];
const SURNAMES: [&str; 6] = ["Kovacs", "Smith", "Novak", "Garcia", "Ito", "Meyer"];

// Reservation parameters with `guests` randomly generated guest records
fn reservation_params(guests: usize) -> ParameterMap {
    let mut rng = thread_rng();
    let res_guests: Vec<Value> = (0..guests)
        .map(|i| {
            json!({
                "GivenName": GIVEN_NAMES.choose(&mut rng).copied().unwrap_or("Ann"),
                "Surname": SURNAMES.choose(&mut rng).copied().unwrap_or("Smith"),
                "Email": format!("guest{}@example.com", i),
                "Phone": format!("+36 1 {:07}", rng.gen_range(0..10_000_000)),
                "AgeQualifyingCode": if rng.gen_bool(0.8) { "adult" } else { "child" },
                "PrimaryIndicator": i == 0,
            })
        })
        .collect();

    ParameterMap::try_from(json!({
        "HotelCode": "H1",
        "ChainCode": "C1",
        "Start": "2025-06-01",
        "End": "2025-06-05",
        "RoomTypeCode": "KING",
        "RatePlanCode": "BAR",
        "Count": {"adult": guests},
        "ResGuests": res_guests,
        "CardCode": "VI",
        "CardNumber": "4111111111111111",
        "CardExpireDate": "1228",
        "Comments": ["Late arrival"],
        "SpecialRequests": ["High floor", {"Name": "CRIB", "Text": "Baby crib"}],
    }))
    .unwrap()
}

pub fn mapping_benchmark(c: &mut Criterion) {
    let credentials = Credentials::new("SYS", "agent", "secret");
    let ctx = RequestContext {
        credentials: &credentials,
        target: Target::Test,
        version: "1.0",
        zone: FixedOffset::east_opt(0).unwrap(),
        now: Utc::now(),
    };

    let mut group = c.benchmark_group("reservation_request");

    for guests in [1, 10, 100].iter() {
        let params = reservation_params(*guests);

        group.bench_with_input(BenchmarkId::new("build", guests), &params, |b, params| {
            b.iter(|| mapper::build(Operation::CreateReservations, black_box(params), &ctx).unwrap())
        });

        group.bench_with_input(
            BenchmarkId::new("build_and_encode", guests),
            &params,
            |b, params| {
                b.iter(|| {
                    mapper::build(Operation::CreateReservations, black_box(params), &ctx)
                        .and_then(|tree| tree.to_xml())
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, mapping_benchmark);
criterion_main!(benches);
