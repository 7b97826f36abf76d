use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::params::LaunchParams;

/// Status of a token launch session.
///
/// The `*Signed` states are write-once markers a caller may set when the
/// widget reports a signature; the confirmation handlers advance directly
/// between the confirmed states and accept either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchStatus {
    Pending,
    CreateSigned,
    CreateConfirmed,
    ApproveSigned,
    ApproveConfirmed,
    LaunchSigned,
    Completed,
    Failed,
    Expired,
}

impl LaunchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchStatus::Pending => "pending",
            LaunchStatus::CreateSigned => "create_signed",
            LaunchStatus::CreateConfirmed => "create_confirmed",
            LaunchStatus::ApproveSigned => "approve_signed",
            LaunchStatus::ApproveConfirmed => "approve_confirmed",
            LaunchStatus::LaunchSigned => "launch_signed",
            LaunchStatus::Completed => "completed",
            LaunchStatus::Failed => "failed",
            LaunchStatus::Expired => "expired",
        }
    }

    /// Terminal states never advance again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LaunchStatus::Completed | LaunchStatus::Failed | LaunchStatus::Expired
        )
    }
}

/// A token launch session, created when the user initiates a launch and
/// tracked until completion or expiry. Mutated only by the `TokenLauncher`.
#[derive(Debug, Clone)]
pub struct LaunchSession {
    pub session_id: String,
    pub params: LaunchParams,
    pub status: LaunchStatus,
    pub created_at: DateTime<Utc>,

    // Chat context, opaque routing identifiers only.
    pub user_id: Option<i64>,
    pub chat_id: Option<i64>,
    pub message_id: Option<i64>,

    // Transaction hashes, recorded as confirmations are reported.
    pub create_tx_hash: Option<String>,
    pub approve_tx_hash: Option<String>,
    pub launch_tx_hash: Option<String>,

    // Deployed addresses
    pub token_address: Option<Address>,
    pub pair_address: Option<Address>,

    pub error_message: Option<String>,
}

impl LaunchSession {
    pub fn new(
        session_id: String,
        params: LaunchParams,
        user_id: Option<i64>,
        chat_id: Option<i64>,
    ) -> Self {
        LaunchSession {
            session_id,
            params,
            status: LaunchStatus::Pending,
            created_at: Utc::now(),
            user_id,
            chat_id,
            message_id: None,
            create_tx_hash: None,
            approve_tx_hash: None,
            launch_tx_hash: None,
            token_address: None,
            pair_address: None,
            error_message: None,
        }
    }

    /// Pure expiry predicate; the session expires when it has not advanced
    /// within the window, measured from creation.
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.created_at > window
    }

    pub fn is_expired(&self, window: Duration) -> bool {
        self.is_expired_at(Utc::now(), window)
    }

    /// Web widget URL where the user signs this session's transactions.
    pub fn signing_url(&self, widget_base_url: &str) -> String {
        format!(
            "{}/{}",
            widget_base_url.trim_end_matches('/'),
            self.session_id
        )
    }

    /// Serialize the session for storage/API consumers.
    pub fn to_json(&self) -> Value {
        json!({
            "session_id": self.session_id,
            "status": self.status.as_str(),
            "created_at": self.created_at.timestamp(),
            "params": {
                "name": self.params.name,
                "symbol": self.params.symbol,
                "supply": self.params.supply,
                "eth_liquidity": self.params.eth_liquidity,
                "lp_percentage": self.params.lp_percentage,
            },
            "user_id": self.user_id,
            "chat_id": self.chat_id,
            "token_address": self.token_address.map(|a| format!("{:?}", a)),
            "pair_address": self.pair_address.map(|a| format!("{:?}", a)),
            "tx_hashes": {
                "create": self.create_tx_hash,
                "approve": self.approve_tx_hash,
                "launch": self.launch_tx_hash,
            },
            "error": self.error_message,
        })
    }
}

/// In-memory session table, owned by whatever hosts the launcher and handed
/// to it at construction. Nothing here survives a restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, LaunchSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: LaunchSession) {
        self.sessions.insert(session.session_id.clone(), session);
    }

    pub fn get(&self, session_id: &str) -> Option<&LaunchSession> {
        self.sessions.get(session_id)
    }

    pub fn get_mut(&mut self, session_id: &str) -> Option<&mut LaunchSession> {
        self.sessions.get_mut(session_id)
    }

    pub fn remove(&mut self, session_id: &str) -> Option<LaunchSession> {
        self.sessions.remove(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session past the expiry window. Returns the removed count.
    pub fn sweep_expired(&mut self, window: Duration) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now, window));
        before - self.sessions.len()
    }
}

/// Result bundle for a completed token launch.
#[derive(Debug, Clone)]
pub struct LaunchResult {
    pub success: bool,
    pub token_address: Option<Address>,
    pub pair_address: Option<Address>,
    pub tx_hashes: TxHashes,
    pub links: HashMap<String, String>,
    pub error: Option<String>,
}

/// The three launch transaction hashes in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxHashes {
    pub create: Option<String>,
    pub approve: Option<String>,
    pub launch: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> LaunchSession {
        let params = LaunchParams::new("Pepe Coin", "PEPE", 1_000_000_000, 0.5, 80);
        LaunchSession::new("abc123".to_string(), params, Some(42), Some(-100))
    }

    #[test]
    fn test_new_session_is_pending() {
        let s = session();
        assert_eq!(s.status, LaunchStatus::Pending);
        assert!(s.create_tx_hash.is_none());
        assert!(s.token_address.is_none());
    }

    #[test]
    fn test_expiry_predicate() {
        let mut s = session();
        let window = Duration::minutes(15);
        assert!(!s.is_expired(window));

        s.created_at = Utc::now() - Duration::minutes(16);
        assert!(s.is_expired(window));

        // Exactly at the boundary is not yet expired.
        let now = Utc::now();
        s.created_at = now - Duration::minutes(15);
        assert!(!s.is_expired_at(now, window));
    }

    #[test]
    fn test_signing_url() {
        let s = session();
        assert_eq!(
            s.signing_url("https://etherfun.app/launch/"),
            "https://etherfun.app/launch/abc123"
        );
    }

    #[test]
    fn test_to_json_shape() {
        let s = session();
        let v = s.to_json();
        assert_eq!(v["session_id"], "abc123");
        assert_eq!(v["status"], "pending");
        assert_eq!(v["params"]["symbol"], "PEPE");
        assert_eq!(v["tx_hashes"]["create"], Value::Null);
        assert_eq!(v["user_id"], 42);
    }

    #[test]
    fn test_store_sweep_expired() {
        let mut store = SessionStore::new();
        let window = Duration::minutes(15);

        let fresh = session();
        let mut stale = session();
        stale.session_id = "stale".to_string();
        stale.created_at = Utc::now() - Duration::minutes(20);

        store.insert(fresh);
        store.insert(stale);
        assert_eq!(store.len(), 2);

        let removed = store.sweep_expired(window);
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("abc123").is_some());
        assert!(store.get("stale").is_none());
    }

    #[test]
    fn test_terminal_states() {
        assert!(LaunchStatus::Completed.is_terminal());
        assert!(LaunchStatus::Failed.is_terminal());
        assert!(LaunchStatus::Expired.is_terminal());
        assert!(!LaunchStatus::Pending.is_terminal());
        assert!(!LaunchStatus::LaunchSigned.is_terminal());
    }
}
