use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use ubx_receiver::*;

const GNGGA: &[u8] =
    b"$GNGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*45\r\n";

/// Interleaved NMEA sentences and UBX frames of growing size, ~100 kB
fn synthetic_stream() -> (Vec<u8>, usize) {
    let mut data = Vec::new();
    let mut frames = 0;
    for i in 0..500u16 {
        data.extend_from_slice(GNGGA);
        let payload: Vec<u8> = (0..(i % 64) * 4).map(|b| b as u8).collect();
        data.extend(build_ubx_command(0x02, 0x15, &payload).unwrap_or_default());
        frames += 2;
    }
    (data, frames)
}

fn parse_all(parser: &mut Parser, data: &[u8], chunk_size: usize) -> usize {
    let mut count = 0;
    for chunk in data.chunks(chunk_size) {
        for result in parser.consume(chunk) {
            match result {
                Ok(_msg) => {
                    count += 1;
                },
                Err(e) => {
                    panic!("No errors allowed! got: {:?}", e);
                },
            }
        }
    }
    count
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (data, frames) = synthetic_stream();

    let mut group = c.benchmark_group("parse_mixed_stream");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for chunk in [1, 99, 256, 1024, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut parser = Parser::default();
                assert_eq!(parse_all(&mut parser, black_box(&data), chunk), frames);
            })
        });
    }
    group.finish();

    c.bench_function("ubx_checksum_4k", |b| {
        let body = vec![0xa5u8; 4096];
        b.iter(|| ubx_checksum(black_box(&body)))
    });
    c.bench_function("nmea_checksum_gga", |b| {
        b.iter(|| nmea_checksum(black_box(&GNGGA[1..GNGGA.len() - 5])))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
