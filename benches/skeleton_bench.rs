use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use ndnx_core::{NdnbEncoder, ObjectFramer, SkeletonDecoder};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// A ContentObject-shaped message: signature, name with components, content.
fn object(seed: u64, components: usize, content: usize) -> Vec<u8> {
    let mut rng = lcg(seed);
    let mut enc = NdnbEncoder::new();
    enc.open_dtag(64);
    enc.open_dtag(37).tagged_blob(40, &[0x5A; 32]);
    enc.close().unwrap();
    enc.open_dtag(14);
    for _ in 0..components {
        let c = format!("c{:08x}", rng.next().unwrap());
        enc.tagged_blob(15, c.as_bytes());
    }
    enc.close().unwrap();
    enc.tagged_blob(19, &vec![0xC3; content]);
    enc.close().unwrap();
    enc.finish().unwrap().to_vec()
}

fn stream(n: usize) -> Vec<u8> {
    (0..n as u64).flat_map(|i| object(i, 4 + (i as usize % 5), 1024)).collect()
}

fn bench_decode_stream(c: &mut Criterion) {
    let bytes = stream(256);
    let mut g = c.benchmark_group("skeleton");
    g.throughput(Throughput::Bytes(bytes.len() as u64));
    g.bench_function("decode_256_objects", |b| {
        b.iter(|| {
            let mut at = 0;
            let mut objects = 0;
            while at < bytes.len() {
                let mut d = SkeletonDecoder::new();
                at += d.decode(&bytes[at..]);
                objects += d.is_final() as usize;
            }
            black_box(objects)
        })
    });
    g.bench_function("decode_256_objects_paused", |b| {
        b.iter(|| {
            let mut d = SkeletonDecoder::with_pause();
            let mut at = 0;
            let mut tokens = 0usize;
            while at < bytes.len() {
                at += d.decode(&bytes[at..]);
                tokens += 1;
            }
            black_box(tokens)
        })
    });
    g.finish();
}

fn bench_framer_fragmented(c: &mut Criterion) {
    let bytes = stream(256);
    let mut g = c.benchmark_group("framer");
    g.throughput(Throughput::Bytes(bytes.len() as u64));
    for chunk in [64usize, 1500] {
        g.bench_function(format!("frame_256_objects_chunk_{chunk}"), |b| {
            b.iter_batched(
                ObjectFramer::default,
                |mut f| {
                    let mut n = 0;
                    for piece in bytes.chunks(chunk) {
                        f.extend(piece);
                        while let Ok(Some(obj)) = f.next_object() {
                            n += obj.len();
                        }
                    }
                    black_box(n)
                },
                BatchSize::SmallInput,
            )
        });
    }
    g.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_decode;
    config = bench_config();
    targets = bench_decode_stream, bench_framer_fragmented
}

criterion_main!(benches_decode);
