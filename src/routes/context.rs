// Per-request client context: trusted forwarded headers + User-Agent

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts},
};
use std::convert::Infallible;
use std::net::SocketAddr;

use super::AppState;
use crate::models::SubmissionMeta;
use crate::proxy::ForwardedInfo;

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub forwarded: ForwardedInfo,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn submission_meta(&self) -> SubmissionMeta {
        SubmissionMeta {
            client_ip: self.forwarded.client_ip.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Absent when the router is not served with connect info (e.g. in-process tests).
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0);
        let forwarded = ForwardedInfo::from_headers(&parts.headers, peer, state.trusted_hops);
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Self {
            forwarded,
            user_agent,
        })
    }
}
