use std::ops::Drop;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RawResponse};
use crate::response::{self, FailurePolicy, Reply};

pub const CLAIM_OWNERSHIP:&str      = "moku/claim_ownership";
pub const RELINQUISH_OWNERSHIP:&str = "moku/relinquish_ownership";

/// One connection to one device. Holds the transport and, once ownership is claimed, the client key
/// that every later request has to carry.
pub struct Session {
    http: HttpClient,
    base_url: String,
    opt_key: Option<String>,
    force_connect: bool,
    policy: FailurePolicy,
    relinquish_on_drop: bool,
}

impl Session {

    pub fn new(config:&Config) -> Result<Self> {
        let http = HttpClient::new(config.timeout)?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            opt_key: None,
            force_connect: config.force_connect,
            policy: config.failure_policy,
            relinquish_on_drop: config.relinquish_on_drop,
        })
    }

    /// Claim, returning a session that already owns the device.
    pub fn connect(config:&Config) -> Result<Self> {
        let mut session = Self::new(config)?;
        session.claim_ownership()?;
        Ok(session)
    }

    pub fn client_key(&self) -> Option<&str> { self.opt_key.as_deref() }
    pub fn base_url(&self) -> &str { &self.base_url }

    fn url(&self, endpoint:&str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Take ownership of the device. The key normally comes back in the `Moku-Client-Key` header;
    /// older firmware only puts it in `data`.
    pub fn claim_ownership(&mut self) -> Result<String> {
        let body:String = json!({ "force_connect": self.force_connect }).to_string();
        let raw:RawResponse = self.http.post(&self.url(CLAIM_OWNERSHIP), None, body)?;
        let header_key = raw.client_key.clone();

        // A refused claim never yields a key, whatever the header or data say
        let reply = self.finish(CLAIM_OWNERSHIP, &raw)?;
        if let Some(failure) = reply.failure {
            return Err(failure.into());
        }

        let key = header_key
            .or_else(|| reply.payload.as_text().map(|s| s.to_owned()))
            .ok_or(Error::MissingClientKey)?;

        info!("claimed ownership");
        self.opt_key = Some(key.clone());
        Ok(key)
    }

    pub fn relinquish_ownership(&mut self) -> Result<()> {
        if self.opt_key.is_none() {
            return Err(Error::NotOwner);
        }

        let reply = self.post_raw(RELINQUISH_OWNERSHIP, String::new())?;
        self.opt_key = None;

        if reply.succeeded() { info!("relinquished ownership"); }
        Ok(())
    }

    pub fn get(&self, endpoint:&str) -> Result<Reply> {
        let raw = self.http.get(&self.url(endpoint), self.client_key())?;
        self.finish(endpoint, &raw)
    }

    pub fn post<T: Serialize + ?Sized>(&self, endpoint:&str, params:&T) -> Result<Reply> {
        let body:String = serde_json::to_string(params).map_err(|e| Error::InvalidArgument(e.to_string()))?;
        self.post_raw(endpoint, body)
    }

    /// Post a body that is already JSON text.
    pub fn post_raw(&self, endpoint:&str, body:String) -> Result<Reply> {
        let raw = self.http.post(&self.url(endpoint), self.client_key(), body)?;
        self.finish(endpoint, &raw)
    }

    fn finish(&self, endpoint:&str, raw:&RawResponse) -> Result<Reply> {
        let reply = response::unwrap(raw)?;
        debug!(endpoint, success = reply.succeeded(), "reply");
        reply.check(self.policy)
    }

}

impl Drop for Session {

    fn drop(&mut self) {
        if self.relinquish_on_drop && self.opt_key.is_some() {
            if let Err(e) = self.relinquish_ownership() {
                warn!("unable to relinquish ownership: {}", e);
            }
        }
    }

}
