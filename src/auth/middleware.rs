use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::{parse_basic_header, verify_admin, AdminAuth};
use crate::common::AppState;

/// Evaluate Basic credentials for every request.
///
/// Never rejects; it only records an [`AdminAuth`] extension for
/// [`super::RequireAdmin`] to act on.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic_header);

    let auth = match credentials {
        Some(creds) => match verify_admin(&state.db, &creds.username, &creds.password).await {
            Ok(true) => AdminAuth::Admin {
                username: creds.username,
            },
            Ok(false) => {
                tracing::debug!(username = %creds.username, "Admin credentials rejected");
                AdminAuth::Anonymous
            }
            Err(e) => {
                tracing::error!("Admin lookup failed: {e:?}");
                AdminAuth::Anonymous
            }
        },
        None => AdminAuth::Anonymous,
    };

    request.extensions_mut().insert(auth);
    next.run(request).await
}
