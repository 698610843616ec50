use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// Простой middleware для логирования запросов
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration = start.elapsed();

    if status < 400 {
        tracing::info!(
            "{:>5}ms | {} {:>6} {}",
            duration.as_millis(),
            status,
            method,
            uri.path()
        );
    } else {
        tracing::warn!(
            "{:>5}ms | {} {:>6} {}",
            duration.as_millis(),
            status,
            method,
            uri.path()
        );
    }

    response
}
