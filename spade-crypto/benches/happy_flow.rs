use criterion::{Criterion, black_box, criterion_group, criterion_main};

use spade_crypto::preset::default_group;
use spade_crypto::spade::Spade;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_happy_flow(c: &mut Criterion) {
    // 1) one-time setup
    let params = default_group(100).expect("build group params");
    let spade = Spade::new(&params);
    let mut rng = StdRng::seed_from_u64(12345);
    let keys = spade.setup(&mut rng);
    let alpha = spade.random_alpha(&mut rng);
    let reg_key = spade.register(&alpha);

    // the same plaintext every iteration
    let plaintext: Vec<u64> = (0..100).map(|i| i % 7).collect();

    c.bench_function("encrypt", |b| {
        b.iter(|| {
            let ciphertext = spade
                .encrypt(&keys.public_keys, &alpha, &plaintext, &mut rng)
                .expect("encrypt");
            black_box(ciphertext);
        })
    });

    let ciphertext = spade
        .encrypt(&keys.public_keys, &alpha, &plaintext, &mut rng)
        .expect("encrypt");

    c.bench_function("derive_and_decrypt", |b| {
        b.iter(|| {
            let dk = spade
                .derive_query_key(3, &keys.secret_keys, &reg_key)
                .expect("derive query key");
            let decrypted = spade.decrypt(&dk, 3, &ciphertext).expect("decrypt");
            black_box(decrypted);
        })
    });
}

criterion_group!(benches, bench_happy_flow);
criterion_main!(benches);
