//! Action-scoped anti-forgery tokens.
//!
//! A token is the truncated HMAC-SHA256 of `tick|action|user_id`, keyed by the
//! site secret. The tick advances every half lifetime and a token verifies
//! for the current and the previous tick, so a token stays valid for between
//! one half and one full lifetime.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Action name the featured-magician form is scoped to.
pub const FEATURED_NONCE_ACTION: &str = "aom-featured-magician-nonce";

/// Form field carrying the featured-magician token.
pub const FEATURED_NONCE_FIELD: &str = "aom_nonce";

/// Default token lifetime: one day.
pub const DEFAULT_NONCE_LIFETIME_SECS: i64 = 24 * 60 * 60;

const TOKEN_HEX_LEN: usize = 20;

/// Which tick a verified token was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceAge {
    Current,
    Previous,
}

/// Issues and checks anti-forgery tokens for a user and action.
pub trait NonceVerifier: Send + Sync {
    fn create(&self, action: &str, user_id: u64) -> String;

    /// Returns the token's age if it is valid for this user and action.
    fn verify(&self, token: &str, action: &str, user_id: u64) -> Option<NonceAge>;
}

/// HMAC-based tokens keyed by a site secret.
pub struct HmacNonces {
    secret: Vec<u8>,
    half_life: i64,
}

impl HmacNonces {
    pub fn new(secret: &[u8], lifetime_secs: i64) -> Self {
        Self {
            secret: secret.to_vec(),
            half_life: (lifetime_secs / 2).max(1),
        }
    }

    /// Tick number for a unix timestamp.
    pub fn tick_at(&self, now: i64) -> i64 {
        (now + self.half_life - 1).div_euclid(self.half_life)
    }

    pub fn create_at(&self, action: &str, user_id: u64, now: i64) -> String {
        self.token_for_tick(self.tick_at(now), action, user_id)
    }

    pub fn verify_at(&self, token: &str, action: &str, user_id: u64, now: i64) -> Option<NonceAge> {
        if token.is_empty() {
            return None;
        }
        let tick = self.tick_at(now);
        let candidates = [(tick, NonceAge::Current), (tick - 1, NonceAge::Previous)];
        candidates.into_iter().find_map(|(t, age)| {
            let expected = self.token_for_tick(t, action, user_id);
            bool::from(expected.as_bytes().ct_eq(token.as_bytes())).then_some(age)
        })
    }

    fn token_for_tick(&self, tick: i64, action: &str, user_id: u64) -> String {
        // HMAC accepts keys of any length, so this cannot fail.
        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(mac) => mac,
            Err(_) => return String::new(),
        };
        mac.update(format!("{tick}|{action}|{user_id}").as_bytes());
        let mut token = hex::encode(mac.finalize().into_bytes());
        token.truncate(TOKEN_HEX_LEN);
        token
    }
}

impl NonceVerifier for HmacNonces {
    fn create(&self, action: &str, user_id: u64) -> String {
        self.create_at(action, user_id, Utc::now().timestamp())
    }

    fn verify(&self, token: &str, action: &str, user_id: u64) -> Option<NonceAge> {
        self.verify_at(token, action, user_id, Utc::now().timestamp())
    }
}
