//! Auth middleware.

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::auth::AuthServiceError;
use tracing::debug;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let app = match depot.app_or_500() {
        Ok(app) => app,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let requester = match app.auth.authenticate_bearer(token).await {
        Ok(requester) => requester,
        Err(AuthServiceError::Expired) => {
            res.render(StatusError::unauthorized().brief("Access token expired"));
            ctrl.skip_rest();

            return;
        }
        Err(error @ (AuthServiceError::Invalid(_) | AuthServiceError::InvalidSubject)) => {
            debug!(error = %error, "rejected access token");

            res.render(StatusError::unauthorized().brief("Invalid access token"));
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_requester(requester);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
