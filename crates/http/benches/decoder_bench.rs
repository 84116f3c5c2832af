use std::hint::black_box;
use std::sync::Arc;

use bytes::BytesMut;
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use futures::executor::block_on;
use http::StatusCode;
use httpfromtcp::codec::{RequestDecoder, ResponseEncoder};
use httpfromtcp::connection::HttpConnection;
use httpfromtcp::handler::{HandlerError, make_handler};
use httpfromtcp::protocol::{Request, Response};
use tokio_util::codec::{Decoder, Encoder};

const SMALL_REQUEST: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";

const LARGE_REQUEST: &[u8] = b"POST /index/?a=1&b=2&a=3 HTTP/1.1\r\n\
Host: 127.0.0.1:8080\r\n\
Connection: keep-alive\r\n\
Cache-Control: max-age=0\r\n\
sec-ch-ua: \"#Not_A Brand\";v=\"99\", \"Microsoft Edge\";v=\"109\", \"Chromium\";v=\"109\"\r\n\
sec-ch-ua-mobile: ?0\r\n\
sec-ch-ua-platform: \"macOS\"\r\n\
Upgrade-Insecure-Requests: 1\r\n\
User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko)\r\n\
Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8\r\n\
Accept-Encoding: gzip, deflate, br\r\n\
Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7\r\n\
Content-Length: 26\r\n\
\r\n\
abcdefghijklmnopqrstuvwxyz";

fn hello_handler(body: &mut BytesMut, _request: Request) -> Result<(), HandlerError> {
    body.extend_from_slice(b"Hello World!");
    Ok(())
}

fn bench_request_decoder(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("request_decoder");

    for (name, input) in [("small_request", SMALL_REQUEST), ("large_request", LARGE_REQUEST)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter_batched_ref(
                || BytesMut::from(*input),
                |bytes_mut| {
                    let request = RequestDecoder::new().decode(bytes_mut).expect("input should be a valid http request");
                    black_box(request);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_response_encoder(c: &mut Criterion) {
    let response = Response::with_body(StatusCode::OK, "Hello World!");

    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            ResponseEncoder::new().encode(response.clone(), &mut bytes).expect("encoding into memory can't fail");
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let handler = Arc::new(make_handler(hello_handler));

    c.bench_function("process_simple_request", |b| {
        b.iter(|| {
            let connection = HttpConnection::new(SMALL_REQUEST, tokio::io::sink());
            black_box(block_on(connection.process(Arc::clone(&handler))).expect("in memory connection can't fail"));
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
