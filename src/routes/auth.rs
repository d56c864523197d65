use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{error::AppError, state::SharedState};

/// Split an `Authorization: Basic <base64(user:pass)>` header value into its credentials.
pub fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

/// Reject requests that do not carry the dashboard credentials.
pub async fn require_basic_auth(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (username, password) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic)
        .ok_or_else(|| AppError::Unauthorized("missing or malformed basic credentials".into()))?;

    if state.config().dashboard.matches(&username, &password) {
        Ok(next.run(req).await)
    } else {
        Err(AppError::Unauthorized(format!(
            "invalid credentials for `{username}`"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_basic_header() {
        assert_eq!(
            decode_basic("Basic YWRtaW46cGFzc3dvcmQ="),
            Some(("admin".into(), "password".into()))
        );
        assert_eq!(
            decode_basic("basic YWRtaW46cGFzc3dvcmQ="),
            Some(("admin".into(), "password".into()))
        );
    }

    #[test]
    fn password_may_contain_colons() {
        // base64("u:a:b")
        assert_eq!(decode_basic("Basic dTphOmI="), Some(("u".into(), "a:b".into())));
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(decode_basic("Bearer YWRtaW46cGFzc3dvcmQ="), None);
        assert_eq!(decode_basic("Basic !!!"), None);
        // base64("nocolon")
        assert_eq!(decode_basic("Basic bm9jb2xvbg=="), None);
        assert_eq!(decode_basic("Basic"), None);
    }
}
