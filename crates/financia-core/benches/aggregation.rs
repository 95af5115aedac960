use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use financia_core::{SummaryService, TypeFilter};
use financia_domain::{CategoryCatalog, NewTransaction, Transaction, TransactionType};

fn build_transactions(count: usize) -> Vec<Transaction> {
    let catalog = CategoryCatalog::default();
    let names: Vec<String> = catalog.names().map(str::to_string).collect();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let kind = if idx % 5 == 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            Transaction::from_new(NewTransaction::new(
                format!("Transaction {idx}"),
                (idx % 500) as f64 + 0.99,
                kind,
                names[idx % names.len()].clone(),
                base + Duration::minutes(idx as i64 * 13 % 100_000),
            ))
        })
        .collect()
}

fn aggregation_benchmark(c: &mut Criterion) {
    let transactions = build_transactions(100_000);
    let catalog = CategoryCatalog::default();

    c.bench_function("compute_summary_100k", |b| {
        b.iter(|| SummaryService::compute_summary(black_box(&transactions)))
    });

    c.bench_function("category_totals_100k", |b| {
        b.iter(|| SummaryService::category_totals(black_box(&transactions), &catalog))
    });

    c.bench_function("filter_and_sort_100k", |b| {
        b.iter(|| {
            SummaryService::filter_and_sort(black_box(&transactions), TypeFilter::Expense, "saction 9")
        })
    });
}

criterion_group!(benches, aggregation_benchmark);
criterion_main!(benches);
