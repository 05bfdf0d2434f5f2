//! Runs controller effects against the admin API.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::ApiClient;
use crate::workflow::{Effect, PeerCommand};

use super::event::Message;

/// Spawns a task that performs `effect` and posts the result back.
pub fn dispatch(api: &ApiClient, effect: Effect, tx: &mpsc::UnboundedSender<Message>) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let message = execute(&api, effect).await;
        if tx.send(message).is_err() {
            debug!("ui gone, dropping api result");
        }
    });
}

/// Performs `effect` and wraps the result in the matching [`Message`].
pub async fn execute(api: &ApiClient, effect: Effect) -> Message {
    match effect {
        Effect::FetchBids {
            ticket,
            status,
            page,
        } => Message::BidsLoaded {
            ticket,
            result: api.bids_by_status(status, page).await,
        },
        Effect::FetchBidDetail { id } => Message::BidDetailLoaded {
            id,
            result: api.bid_detail(id).await,
        },
        Effect::CancelBid { id } => Message::BidCancelled {
            id,
            result: api.cancel_bid(id).await,
        },
        Effect::FetchPeers { ticket, source } => Message::PeersLoaded {
            ticket,
            result: api.peers(&source).await,
        },
        Effect::PeerMutation {
            peer_id,
            action,
            command,
        } => {
            let result = match command {
                PeerCommand::Decide(decision) => api.decide_payment(peer_id, &decision).await,
                PeerCommand::Unpair => api.unpair(peer_id).await,
                PeerCommand::Block { user_id } => api.block_user(user_id).await,
            };
            Message::PeerActionDone {
                peer_id,
                action,
                result,
            }
        }
    }
}
