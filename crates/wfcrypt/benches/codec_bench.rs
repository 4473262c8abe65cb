use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use wfcrypt::{BlockSize, CbcCodec, Rijndael};

fn bench_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);

    let mut group = c.benchmark_group("block");
    for block_size in BlockSize::ALL {
        let cipher = Rijndael::new(block_size, &key).expect("valid key");
        let mut block = vec![0u8; block_size.bytes()];
        rng.fill_bytes(&mut block);
        group.throughput(Throughput::Bytes(block.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("encrypt", block_size.bytes()),
            &block,
            |b, block| {
                let mut data = block.clone();
                b.iter(|| cipher.encrypt_block(&mut data).expect("block length"));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("decrypt", block_size.bytes()),
            &block,
            |b, block| {
                let mut data = block.clone();
                b.iter(|| cipher.decrypt_block(&mut data).expect("block length"));
            },
        );
    }
    group.finish();
}

fn bench_cbc(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let codec = CbcCodec::new(BlockSize::Nb4, &[0x42u8; 16]).expect("valid key");
    let mut payload = vec![0u8; 64 * 1024];
    rng.fill_bytes(&mut payload);

    let mut group = c.benchmark_group("cbc");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("encrypt_64k", |b| {
        let mut iv = [0u8; 16];
        b.iter(|| {
            let mut data = payload.clone();
            codec.encrypt(&mut rng, &mut data, &mut iv).expect("aligned payload");
        });
    });
    group.bench_function("decrypt_64k", |b| {
        let iv = [0u8; 16];
        b.iter(|| {
            let mut data = payload.clone();
            codec.decrypt(&mut data, &iv).expect("aligned payload");
        });
    });
    group.finish();
}

criterion_group!(benches, bench_block, bench_cbc);
criterion_main!(benches);
