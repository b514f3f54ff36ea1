use criterion::{criterion_group, criterion_main, Criterion};
use dupe_alert::{reconcile, FilterConfig, Offer, PollData};
use dupe_alert::response::{OfferDate, Party};

fn create_offers(count: i64) -> Vec<Offer> {
    (0..count)
        .map(|i| Offer {
            equity: Some((i * 10_000) as f64),
            required_aden: Some((i * 100_000) as f64),
            seller: Some(Party {
                date: Some(OfferDate::Integer(1449000000 + i)),
                ..Party::default()
            }),
            buyer: Some(Party {
                date: Some(OfferDate::Integer(1449100000 + i)),
                ..Party::default()
            }),
            ..Offer::default()
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let offers = create_offers(1000);
    let first = reconcile(offers.clone(), &PollData::new(), &FilterConfig::default());
    // Every other offer has been seen.
    let poll_data = PollData {
        resolved: first.offers.iter().step_by(10).map(|tracked| tracked.id.clone()).collect(),
        seen: first.offers.iter().step_by(2).map(|tracked| tracked.id.clone()).collect(),
    };
    let filters = FilterConfig {
        min_equity_on: true,
        max_required_on: true,
        ..FilterConfig::default()
    };
    
    c.bench_function("reconcile 1000 new offers", |b| b.iter(|| {
        reconcile(offers.clone(), &PollData::new(), &FilterConfig::default())
    }));
    
    c.bench_function("reconcile 1000 offers, half seen, filtered", |b| b.iter(|| {
        reconcile(offers.clone(), &poll_data, &filters)
    }));
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = criterion_benchmark
}

criterion_main!(benches);
