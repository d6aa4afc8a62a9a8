use crate::{
    error,
    jwt::Claims,
    policy::{self, Action, Decision, Principal, Resource},
    StateTrait,
};
use axum::{
    http::Request,
    response::{IntoResponse, Response},
};
use entity::users;
use futures::{future::BoxFuture, Future};
use sea_orm::EntityTrait;
use std::{
    convert::Infallible,
    mem,
    task::{Context, Poll},
};
use tower::{Layer, Service};

/// Resolves the caller into a [`Principal`] and checks that its role allows `action`.
///
/// On success the principal is stored in the request extensions for the handler.
#[derive(Debug, Clone)]
pub struct PermissionsLayer<ST> {
    state: ST,
    action: Action,
}

impl<ST> PermissionsLayer<ST> {
    pub fn new(state: ST, action: Action) -> Self {
        Self { state, action }
    }
}

impl<S, ST> Layer<S> for PermissionsLayer<ST>
where
    ST: Clone,
{
    type Service = Permissions<S, ST>;

    fn layer(&self, inner: S) -> Self::Service {
        Permissions::new(self.state.clone(), inner, self.action)
    }
}

#[derive(Debug, Clone)]
pub struct Permissions<S, ST> {
    state: ST,
    inner: S,
    action: Action,
}

impl<S, ST> Permissions<S, ST> {
    fn new(state: ST, inner: S, action: Action) -> Self {
        Permissions {
            state,
            inner,
            action,
        }
    }
}

impl<S, B, ST> Service<Request<B>> for Permissions<S, ST>
where
    S: Service<Request<B>, Error = Infallible, Response = Response> + Clone + Send + 'static,
    S::Future: Future + Send + 'static,
    B: Send + 'static,
    ST: StateTrait,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let Some(claims) = req.extensions().get::<Claims>().cloned() else {
            return Box::pin(async { Ok(error::COULD_NOT_GET_CLAIMS.into_response()) });
        };

        // the clone is not ready yet, keep the one that is
        let clone = self.inner.clone();
        let mut inner = mem::replace(&mut self.inner, clone);

        let state = self.state.clone();
        let action = self.action;

        Box::pin(async move {
            let user = match users::Entity::find_by_id(claims.sub).one(state.db()).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    // this is suspicious so log it
                    warn!("valid token for an unknown user");
                    return Ok(error::USER_NOT_REGISTERED.into_response());
                }
                Err(err) => return Ok(error::Error::from(err).into_response()),
            };

            let principal = Principal {
                id: user.id,
                role: user.role,
            };

            if let Decision::Deny(denial) = policy::can(&principal, action, Resource::Global) {
                debug!(?action, ?denial, "permission denied");
                return Ok(error::Error::from(denial).into_response());
            }

            req.extensions_mut().insert(principal);

            inner.call(req).await
        })
    }
}
