use leptos::prelude::*;
use shared::utils::truncate_address;

use crate::state::use_wallet_context;

/// Confirmation dialog with an explorer link for the last transaction.
#[component]
pub fn TxSubmittedDialog() -> impl IntoView {
    let wallet = use_wallet_context();
    let close = move |_: leptos::ev::MouseEvent| wallet.submitted_tx.set(None);

    view! {
        {move || wallet.submitted_tx.get().map(|tx| view! {
            <div class="modal-backdrop" on:click=close>
                <div class="modal tx-dialog" on:click=|ev| ev.stop_propagation()>
                    <h3>"Transaction Submitted"</h3>
                    <p class="muted">"Your transaction has been confirmed on-chain."</p>
                    <p class="tx-hash">{truncate_address(&tx.hash)}</p>
                    <a class="btn btn-secondary" href=tx.explorer_url target="_blank" rel="noopener noreferrer">
                        "View on explorer"
                    </a>
                    <button class="btn btn-primary" on:click=close>"Close"</button>
                </div>
            </div>
        })}
    }
}
