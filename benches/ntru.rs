use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ntru::{
    decrypt, encrypt, generate_encryption_key_pair, generate_signature_key_pair, sign,
    verify, EncryptionParams, SignatureParams,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn encryption_benchmarks(c: &mut Criterion) {
    let params = EncryptionParams::apr2011_439();
    let mut rng = ChaCha20Rng::seed_from_u64(9001);
    let kp = generate_encryption_key_pair(&params, &mut rng).unwrap();
    let msg = [0x5au8; 64];
    let ct = encrypt(&msg, &kp.public, &params, &mut rng).unwrap();

    let mut group = c.benchmark_group("encrypt_439");
    group.bench_function("keygen", |b| {
        b.iter(|| generate_encryption_key_pair(&params, &mut rng).unwrap())
    });
    group.bench_function("encrypt", |b| {
        b.iter(|| encrypt(black_box(&msg), &kp.public, &params, &mut rng).unwrap())
    });
    group.bench_function("decrypt", |b| {
        b.iter(|| decrypt(black_box(&ct), &kp, &params).unwrap())
    });
    group.finish();
}

fn signature_benchmarks(c: &mut Criterion) {
    let params = SignatureParams::s157();
    let mut rng = ChaCha20Rng::seed_from_u64(9002);
    let kp = generate_signature_key_pair(&params, &mut rng).unwrap();
    let msg = b"benchmark message";
    let sig = sign(msg, &kp, &params).unwrap();

    let mut group = c.benchmark_group("sign_157");
    group.sample_size(10);
    group.bench_function("keygen", |b| {
        b.iter(|| generate_signature_key_pair(&params, &mut rng).unwrap())
    });
    group.bench_function("sign", |b| {
        b.iter(|| sign(black_box(msg), &kp, &params).unwrap())
    });
    group.bench_function("verify", |b| {
        b.iter(|| verify(black_box(msg), &sig, &kp.public, &params))
    });
    group.finish();
}

criterion_group!(benches, encryption_benchmarks, signature_benchmarks);
criterion_main!(benches);
