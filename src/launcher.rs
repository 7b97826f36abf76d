use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use ethers::providers::{Http, JsonRpcClient};
use ethers::types::Address;
use log::{error, info, warn};
use rand::RngCore;

use crate::api::VistaClient;
use crate::config::CONFIG;
use crate::errors::{EtherfunError, Result};
use crate::models::{
    FeeParams, GasEstimate, LaunchParams, LaunchResult, LaunchSession, LaunchStatus, SessionStore,
    TransactionDescriptor, TxHashes,
};

/// Orchestrates the three-step token launch flow: create, approve, launch.
///
/// Owns the session table for its lifetime and is the only writer to it.
/// Each step hands back an unsigned transaction descriptor for the signing
/// widget; confirmation callbacks advance the session and produce the next
/// descriptor.
pub struct TokenLauncher<P = Http> {
    contracts: VistaClient<P>,
    store: SessionStore,
    expiry_window: Duration,
    widget_base_url: String,
}

impl<P: JsonRpcClient> TokenLauncher<P> {
    pub fn new(contracts: VistaClient<P>, store: SessionStore) -> Self {
        TokenLauncher {
            contracts,
            store,
            expiry_window: Duration::minutes(CONFIG.session_expiry_minutes),
            widget_base_url: CONFIG.widget_base_url.clone(),
        }
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    fn mint_session_id() -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Validate parameters and open a new session. On validation failure no
    /// session is created and every violation is returned.
    pub fn create_session(
        &mut self,
        name: &str,
        symbol: &str,
        supply: u64,
        eth_liquidity: f64,
        user_id: Option<i64>,
        chat_id: Option<i64>,
        lp_percentage: u8,
    ) -> (Option<LaunchSession>, Vec<String>) {
        let params = LaunchParams::new(name, symbol, supply, eth_liquidity, lp_percentage);
        let violations = params.validate();
        if !violations.is_empty() {
            warn!("Rejected launch parameters for {}: {:?}", symbol, violations);
            return (None, violations);
        }

        let session = LaunchSession::new(Self::mint_session_id(), params, user_id, chat_id);
        info!(
            "Created launch session {} for token {}",
            session.session_id, session.params.symbol
        );
        self.store.insert(session.clone());
        (Some(session), Vec::new())
    }

    /// Look up a session, lazily marking it expired when the window has
    /// passed. Terminal sessions keep their status.
    pub fn get_session(&mut self, session_id: &str) -> Option<&LaunchSession> {
        let window = self.expiry_window;
        let session = self.store.get_mut(session_id)?;
        if !session.status.is_terminal() && session.is_expired(window) {
            info!("Session {} expired", session_id);
            session.status = LaunchStatus::Expired;
        }
        Some(&*session)
    }

    fn live_session_mut(&mut self, session_id: &str) -> Result<&mut LaunchSession> {
        let window = self.expiry_window;
        let session = self
            .store
            .get_mut(session_id)
            .ok_or_else(|| EtherfunError::SessionNotFound(session_id.to_string()))?;
        if !session.status.is_terminal() && session.is_expired(window) {
            info!("Session {} expired", session_id);
            session.status = LaunchStatus::Expired;
        }
        Ok(session)
    }

    fn require_status(
        session: &LaunchSession,
        accepted: &[LaunchStatus],
        expected: &str,
    ) -> Result<()> {
        if accepted.contains(&session.status) {
            Ok(())
        } else {
            Err(EtherfunError::InvalidStatus {
                expected: expected.to_string(),
                actual: session.status.as_str().to_string(),
            })
        }
    }

    pub async fn get_gas_estimate(&self) -> Result<GasEstimate> {
        self.contracts.estimate_launch_cost().await
    }

    /// Build the token creation transaction for a pending session and record
    /// the creator address on it.
    pub async fn build_create_tx(
        &mut self,
        session_id: &str,
        creator_address: Address,
    ) -> Result<TransactionDescriptor> {
        let (name, symbol, supply) = {
            let session = self.live_session_mut(session_id)?;
            Self::require_status(session, &[LaunchStatus::Pending], "pending")?;
            session.params.creator_address = Some(creator_address);
            (
                session.params.name.clone(),
                session.params.symbol.clone(),
                session.params.supply,
            )
        };

        self.contracts
            .build_create_token_tx(&name, &symbol, supply, creator_address, true)
            .await
    }

    /// Record that the create transaction was signed in the widget.
    pub fn mark_create_signed(&mut self, session_id: &str) -> Result<()> {
        self.advance_marker(session_id, LaunchStatus::Pending, LaunchStatus::CreateSigned)
    }

    /// Record that the approve transaction was signed in the widget.
    pub fn mark_approve_signed(&mut self, session_id: &str) -> Result<()> {
        self.advance_marker(
            session_id,
            LaunchStatus::CreateConfirmed,
            LaunchStatus::ApproveSigned,
        )
    }

    /// Record that the launch transaction was signed in the widget.
    pub fn mark_launch_signed(&mut self, session_id: &str) -> Result<()> {
        self.advance_marker(
            session_id,
            LaunchStatus::ApproveConfirmed,
            LaunchStatus::LaunchSigned,
        )
    }

    fn advance_marker(
        &mut self,
        session_id: &str,
        from: LaunchStatus,
        to: LaunchStatus,
    ) -> Result<()> {
        let session = self.live_session_mut(session_id)?;
        Self::require_status(session, &[from], from.as_str())?;
        session.status = to;
        Ok(())
    }

    /// Handle confirmation of the create transaction: record the deployed
    /// token and return the approve transaction for signing.
    pub async fn on_create_confirmed(
        &mut self,
        session_id: &str,
        tx_hash: &str,
        token_address: Address,
    ) -> Result<TransactionDescriptor> {
        let owner = {
            let session = self.live_session_mut(session_id)?;
            Self::require_status(
                session,
                &[LaunchStatus::Pending, LaunchStatus::CreateSigned],
                "pending",
            )?;
            session.params.creator_address.ok_or_else(|| {
                EtherfunError::InvalidParameter(
                    "Creator address not set; build the create transaction first".to_string(),
                )
            })?
        };

        // Build before advancing: an RPC failure here must leave the session
        // where it was so the caller can retry the confirmation.
        let tx = self
            .contracts
            .build_approve_tx(token_address, owner, None)
            .await?;

        let session = self
            .store
            .get_mut(session_id)
            .ok_or_else(|| EtherfunError::SessionNotFound(session_id.to_string()))?;
        session.create_tx_hash = Some(tx_hash.to_string());
        session.token_address = Some(token_address);
        session.status = LaunchStatus::CreateConfirmed;
        info!(
            "Session {}: token created at {:?} ({})",
            session_id, token_address, tx_hash
        );

        Ok(tx)
    }

    /// Handle confirmation of the approve transaction and return the launch
    /// transaction for signing.
    pub async fn on_approve_confirmed(
        &mut self,
        session_id: &str,
        tx_hash: &str,
    ) -> Result<TransactionDescriptor> {
        let (token_address, lp_amount, eth_liquidity, creator) = {
            let session = self.live_session_mut(session_id)?;
            Self::require_status(
                session,
                &[LaunchStatus::CreateConfirmed, LaunchStatus::ApproveSigned],
                "create_confirmed",
            )?;
            let token_address = session.token_address.ok_or_else(|| {
                EtherfunError::Transaction("Session has no token address".to_string())
            })?;
            let creator = session.params.creator_address.ok_or_else(|| {
                EtherfunError::InvalidParameter(
                    "Creator address not set; build the create transaction first".to_string(),
                )
            })?;
            (
                token_address,
                session.params.lp_token_amount(),
                session.params.eth_liquidity,
                creator,
            )
        };

        // Build before advancing so a failed nonce fetch leaves the session
        // retryable.
        let tx = self
            .contracts
            .build_launch_tx(
                token_address,
                lp_amount,
                eth_liquidity,
                creator,
                FeeParams::default(),
            )
            .await?;

        let session = self
            .store
            .get_mut(session_id)
            .ok_or_else(|| EtherfunError::SessionNotFound(session_id.to_string()))?;
        session.approve_tx_hash = Some(tx_hash.to_string());
        session.status = LaunchStatus::ApproveConfirmed;
        info!("Session {}: router approved ({})", session_id, tx_hash);

        Ok(tx)
    }

    /// Handle confirmation of the launch transaction: the flow is complete.
    /// The pair address lookup is best-effort; the result carries whatever
    /// links could be derived.
    pub async fn on_launch_confirmed(
        &mut self,
        session_id: &str,
        tx_hash: &str,
    ) -> Result<LaunchResult> {
        let token_address = {
            let session = self.live_session_mut(session_id)?;
            Self::require_status(
                session,
                &[LaunchStatus::ApproveConfirmed, LaunchStatus::LaunchSigned],
                "approve_confirmed",
            )?;
            session.token_address.ok_or_else(|| {
                EtherfunError::Transaction("Session has no token address".to_string())
            })?
        };

        let pair_address = self.contracts.get_pair_address(token_address).await;
        let links = crate::links::launch_links(token_address, pair_address);

        let session = self
            .store
            .get_mut(session_id)
            .ok_or_else(|| EtherfunError::SessionNotFound(session_id.to_string()))?;
        session.launch_tx_hash = Some(tx_hash.to_string());
        session.pair_address = pair_address;
        session.status = LaunchStatus::Completed;
        info!(
            "Session {}: launch complete for {:?} (pair: {:?})",
            session_id, token_address, pair_address
        );

        Ok(LaunchResult {
            success: true,
            token_address: Some(token_address),
            pair_address,
            tx_hashes: TxHashes {
                create: session.create_tx_hash.clone(),
                approve: session.approve_tx_hash.clone(),
                launch: session.launch_tx_hash.clone(),
            },
            links,
            error: None,
        })
    }

    /// Mark a session as failed with an error message. Unknown session ids
    /// are ignored so transport callbacks can report failures blindly.
    pub fn fail_session(&mut self, session_id: &str, error_message: &str) {
        if let Some(session) = self.store.get_mut(session_id) {
            error!("Session {} failed: {}", session_id, error_message);
            session.status = LaunchStatus::Failed;
            session.error_message = Some(error_message.to_string());
        }
    }

    /// Remove every session past the expiry window. Returns the removed count.
    pub fn cleanup_expired(&mut self) -> usize {
        let removed = self.store.sweep_expired(self.expiry_window);
        if removed > 0 {
            info!("Cleaned up {} expired sessions", removed);
        }
        removed
    }

    /// Human-readable summary of a session for chat display, including a
    /// fresh gas estimate and the signing link.
    pub async fn get_session_summary(&mut self, session_id: &str) -> Result<String> {
        let widget_base_url = self.widget_base_url.clone();
        let (params, status, url) = match self.get_session(session_id) {
            Some(session) => (
                session.params.clone(),
                session.status,
                session.signing_url(&widget_base_url),
            ),
            None => return Ok("Session not found".to_string()),
        };

        let estimate = self.get_gas_estimate().await?;
        Ok(format!(
            "Token Launch: {} ({})\n\
             Supply: {}\n\
             Initial liquidity: {} ETH ({}% of supply)\n\
             Status: {}\n\
             Estimated gas cost: {:.6} ETH ({:.1} gwei)\n\
             Sign here: {}\n\
             This session expires in {} minutes.",
            params.name,
            params.symbol,
            params.supply,
            params.eth_liquidity,
            params.lp_percentage,
            status.as_str(),
            estimate.total_cost_eth,
            estimate.gas_price_gwei(),
            url,
            self.expiry_window.num_minutes(),
        ))
    }
}
