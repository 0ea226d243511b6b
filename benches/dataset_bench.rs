//! Benchmarks for dataset loading and view queries
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use snowatlas::dataset::{Dataset, DatasetLoader, Flag};
use snowatlas::query::{filter_by_continent, filter_by_country, filter_map, report_card, MapFilter};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "ID,Resort,Latitude,Longitude,Country,Continent,Price,Highest point,\
Total slopes,Snow cannons,Snowparks,Nightskiing,Summer skiing,Longest run\n";

/// Synthetic resort table spread over 40 countries on 5 continents
fn create_test_csv(count: usize) -> Vec<u8> {
    let mut csv = String::from(HEADER);
    for i in 0..count {
        let flag = |n: usize| if (i / n) % 2 == 0 { "Yes" } else { "No" };
        csv.push_str(&format!(
            "{},Resort {},{},{},Country {},Continent {},{},{},{},{},{},{},{},{}\n",
            i + 1,
            i,
            (i % 180) as f64 - 90.0,
            (i % 360) as f64 - 180.0,
            i % 40,
            i % 5,
            20 + (i * 7) % 130,
            500 + (i * 13) % 3500,
            (i * 3) % 400,
            (i * 11) % 1200,
            flag(1),
            flag(2),
            flag(4),
            (i * 5) % 20,
        ));
    }
    csv.into_bytes()
}

fn load(csv: &[u8]) -> Dataset {
    DatasetLoader::new().load_reader(csv).unwrap()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [100, 1000, 10000] {
        let csv = create_test_csv(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("load_and_rank_{}", size), |b| {
            b.iter(|| load(black_box(&csv)))
        });
    }

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&create_test_csv(1000)).unwrap();
    let loader = DatasetLoader::new();

    group.bench_function("load_path_1000", |b| {
        b.iter(|| loader.load_path(black_box(file.path())).unwrap())
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let dataset = load(&create_test_csv(10000));

    let filter = MapFilter::new(75.0, Flag::Yes, Flag::No, Flag::Yes);
    group.bench_function("filter_map_10000", |b| {
        b.iter(|| filter_map(black_box(&dataset), black_box(&filter)))
    });

    group.bench_function("filter_by_continent_10000", |b| {
        b.iter(|| filter_by_continent(black_box(&dataset), "Continent 3"))
    });

    group.bench_function("filter_by_country_10000", |b| {
        b.iter(|| filter_by_country(black_box(&dataset), "Country 7", "Total slopes").unwrap())
    });

    group.bench_function("report_card_10000", |b| {
        b.iter(|| report_card(black_box(&dataset), "Resort 4242").unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_queries);
criterion_main!(benches);
