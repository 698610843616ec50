use axum::{body::Body, extract::Request, middleware::Next};

fn assert_send<T: Send>(_: T) {}

async fn make(req: Request<Body>, next: Next) {
    let _ = backend::system::auth::middleware::require_auth(req, next).await;
}

fn main() {
    // build a dummy future to inspect Send
    fn _f(r: Request<Body>, n: Next) {
        assert_send(backend::system::auth::middleware::require_auth(r, n));
    }
    let _ = make;
    let _ = _f;
}
