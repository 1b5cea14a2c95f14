use criterion::{black_box, criterion_group, criterion_main, Criterion};
use helium::store::codec;
use helium_types::{Anchor, WidgetInstance, WidgetModule, WidgetSet, WidgetSetDetails};
use serde_json::Value;

fn sample_sets(count: usize) -> Vec<WidgetSet> {
    (0..count)
        .map(|i| {
            let details = WidgetSetDetails::for_new_set(format!("Set {}", i), Anchor::Left);
            let widgets = WidgetModule::ALL
                .into_iter()
                .map(WidgetInstance::with_module)
                .collect();
            WidgetSet::with_widgets(details, widgets)
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let sets = sample_sets(8);
    let encoded = Value::Array(codec::encode(&sets));

    c.bench_function("encode 8 sets", |b| b.iter(|| codec::encode(black_box(&sets))));
    c.bench_function("decode 8 sets", |b| {
        b.iter(|| codec::decode(black_box(Some(&encoded))))
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
