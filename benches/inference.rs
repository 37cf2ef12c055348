//! Inference benchmark: feature vector → centroid predict.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyprint::dataset::{FeatureTable, Label, LabeledRow, LABEL_COLUMN};
use keyprint::features::{FeatureVector, FEATURE_COUNT};
use keyprint::model::{CentroidModel, Classifier};

fn make_table(users: u32, per_user: usize) -> FeatureTable {
    let mut rows = Vec::new();
    for u in 0..users {
        for i in 0..per_user {
            let base = 0.05 * (u + 1) as f64 + 0.001 * i as f64;
            rows.push(LabeledRow {
                features: FeatureVector::from_array([base; FEATURE_COUNT]),
                label: Label(u),
            });
        }
    }
    FeatureTable::from_rows(rows)
}

fn bench_predict(c: &mut Criterion) {
    let model = CentroidModel::train(&make_table(21, 10), LABEL_COLUMN).unwrap();
    let fv = FeatureVector::from_array([0.31; FEATURE_COUNT]);

    c.bench_function("centroid_predict_21_users", |b| {
        b.iter(|| model.predict(black_box(&fv)).unwrap())
    });
}

fn bench_train_by_users(c: &mut Criterion) {
    let mut g = c.benchmark_group("centroid_train_by_users");
    for users in [5u32, 21, 100] {
        let table = make_table(users, 20);
        g.bench_function(format!("users_{}", users).as_str(), |b| {
            b.iter(|| CentroidModel::train(black_box(&table), LABEL_COLUMN).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_predict, bench_train_by_users);
criterion_main!(benches);
