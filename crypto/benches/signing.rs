use chatsig_crypto::{KeyPair, VerifiableMessage};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sign(pair: &KeyPair, n: usize) -> VerifiableMessage {
    let text = "x".repeat(n);
    pair.sign_message(text).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let pair = KeyPair::generate();
    c.bench_function("sign 128", |b| b.iter(|| sign(black_box(&pair), 128)));
    c.bench_function("sign 1024*128", |b| b.iter(|| sign(black_box(&pair), 1024 * 128)));

    let msg = sign(&pair, 1024);
    let public = pair.pub_key();
    c.bench_function("verify 1024", |b| b.iter(|| black_box(&msg).check(&public)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
