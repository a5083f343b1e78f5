//! Limit-order panel: place buy/sell orders at a USD price and manage the
//! connected account's orders.

use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_evm::dex;
use shared::chains::Chain;
use shared::dto::{Order, OrderType, Token};
use shared::forms::limit::{self, LimitAction, LimitOrderForm};
use shared::forms::ChainTokens;

use super::{TokenButton, TokenSelector};
use crate::error::AppError;
use crate::services::ethereum::client;
use crate::state::{use_settings_context, use_toast_context, use_wallet_context};
use crate::utils::format::format_balance;

#[component]
pub fn LimitOrder() -> impl IntoView {
    let settings = use_settings_context();

    view! {
        {move || match settings.active_chain() {
            Some(chain) if chain.supports_limit_orders() => view! { <LimitOrderPanel/> }.into_any(),
            Some(chain) => view! {
                <div class="card coming-soon">
                    <h2 class="card-title">"Limit Orders"</h2>
                    <p class="muted">{limit::coming_soon_text(chain.name)}</p>
                </div>
            }
            .into_any(),
            None => ().into_any(),
        }}
    }
}

#[component]
fn LimitOrderPanel() -> impl IntoView {
    let settings = use_settings_context();
    let wallet = use_wallet_context();
    let toasts = use_toast_context();

    let form = RwSignal::new(LimitOrderForm::default());
    let picker_open = RwSignal::new(false);

    // Replies can land after the panel is gone
    let dispatch = move |action: LimitAction| {
        form.try_update(|f| f.dispatch(action));
    };

    let load_orders = move || {
        let Ok((owner, chain)) = wallet.session() else {
            return;
        };
        dispatch(LimitAction::OrdersLoading);
        spawn_local(async move {
            let orders = match dex::user_orders(&client(), chain, owner).await {
                Ok(orders) => orders,
                Err(e) => {
                    log::warn!("Failed to load orders: {}", e);
                    Vec::new()
                }
            };
            dispatch(LimitAction::OrdersLoaded(orders));
        });
    };

    let refresh_balance = move |token: Token| {
        spawn_local(async move {
            if let Some(balance) = wallet.fetch_balance(&token).await {
                dispatch(LimitAction::UpdateTokenBalance {
                    address: token.address,
                    balance,
                });
            }
        });
    };

    Effect::new(move |_| {
        let Some(key) = settings.active_key.get() else {
            return;
        };
        let tokens = settings.token_list.get_untracked();
        dispatch(LimitAction::ChainChanged(
            ChainTokens::from(Chain::by_key(key)).with_tokens(tokens),
        ));
    });

    Effect::new(move |_| {
        let tokens = settings.token_list.get();
        dispatch(LimitAction::SetTokenList(tokens));
    });

    // Orders follow the connected account and chain
    Effect::new(move |_| {
        settings.active_key.track();
        if wallet.address().is_some() {
            load_orders();
        }
    });

    let token_address = Memo::new(move |_| form.with(|f| f.token.as_ref().map(|t| t.address)));
    Effect::new(move |_| {
        token_address.track();
        if wallet.address().is_none() {
            return;
        }
        if let Some(token) = form.with_untracked(|f| f.token.clone()) {
            refresh_balance(token);
        }
    });

    let connected = move || wallet.connection.with(|c| c.is_connected());
    let native_symbol = move || settings.active_chain().map(|c| c.symbol).unwrap_or_default();

    let on_submit = move || {
        let request = match form.with_untracked(|f| f.order_request()) {
            Ok(request) => request,
            Err(e) => {
                toasts.report("Order Failed", &AppError::from(e));
                return;
            }
        };
        let (owner, chain) = match wallet.session() {
            Ok(session) => session,
            Err(e) => {
                toasts.report("Order Failed", &e);
                return;
            }
        };

        dispatch(LimitAction::BeginSubmit);
        spawn_local(async move {
            match dex::create_order(&client(), chain, owner, &request).await {
                Ok(order_id) => {
                    toasts.push(limit::placed_notice(&request, order_id));
                    dispatch(LimitAction::Reset);
                    refresh_balance(request.token().clone());
                    load_orders();
                }
                Err(e) => {
                    let error = AppError::from(e);
                    log::error!("Order placement failed: {}", error);
                    toasts.push(limit::order_failed_notice(error.user_message()));
                }
            }
            dispatch(LimitAction::EndSubmit);
        });
    };

    let on_cancel = move |order_id: u64| {
        let Ok((owner, chain)) = wallet.session() else {
            return;
        };
        dispatch(LimitAction::CancelStarted(order_id));
        spawn_local(async move {
            match dex::cancel_order(&client(), chain, owner, order_id).await {
                Ok(_) => {
                    toasts.push(limit::cancelled_notice(order_id));
                    load_orders();
                }
                Err(e) => {
                    let error = AppError::from(e);
                    log::error!("Cancelling order #{} failed: {}", order_id, error);
                    toasts.push(limit::cancel_failed_notice(error.user_message()));
                }
            }
            dispatch(LimitAction::CancelFinished);
        });
    };

    let is_buy = move || form.with(|f| f.mode == OrderType::Buy);

    let amount_label = move || {
        if is_buy() {
            format!("Amount ({})", native_symbol())
        } else {
            let symbol = form.with(|f| f.token.as_ref().map(|t| t.symbol.clone()).unwrap_or_default());
            format!("Amount ({})", symbol)
        }
    };

    let button_label = move || {
        if connected() {
            form.with(|f| f.button_text())
        } else {
            "Connect Wallet"
        }
    };
    let button_disabled = move || connected() && form.with(|f| f.is_submitting || !f.is_valid());

    view! {
        <div class="card limit-card">
            <div class="card-header">
                <h2 class="card-title">"Limit Order"</h2>
            </div>

            <div class="tabs mode-tabs">
                <button
                    class="tab"
                    class:active=is_buy
                    on:click=move |_| dispatch(LimitAction::SetMode(OrderType::Buy))
                >
                    "Buy"
                </button>
                <button
                    class="tab"
                    class:active=move || !is_buy()
                    on:click=move |_| dispatch(LimitAction::SetMode(OrderType::Sell))
                >
                    "Sell"
                </button>
            </div>

            <div class="field-header">
                <span class="muted">"Token"</span>
                <Show when=move || !is_buy()>
                    <span class="muted">
                        {move || form.with(|f| {
                            f.token
                                .as_ref()
                                .map(|t| format!("Balance: {}", format_balance(&t.balance)))
                                .unwrap_or_default()
                        })}
                    </span>
                </Show>
            </div>
            <TokenButton
                token=Signal::derive(move || form.with(|f| f.token.clone()))
                on_click=Callback::new(move |_| picker_open.set(true))
            />

            <label class="field-label">"Price (USD)"</label>
            <input
                class="input"
                type="text"
                inputmode="decimal"
                placeholder="0.00"
                prop:value=move || form.with(|f| f.price.clone())
                on:input=move |ev| dispatch(LimitAction::SetPrice(event_target_value(&ev)))
            />

            <label class="field-label">{amount_label}</label>
            <input
                class="input"
                type="text"
                inputmode="decimal"
                placeholder="0.0"
                prop:value=move || form.with(|f| if f.mode == OrderType::Buy { f.eth_amount.clone() } else { f.token_amount.clone() })
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    if is_buy() {
                        dispatch(LimitAction::SetEthAmount(value));
                    } else {
                        dispatch(LimitAction::SetTokenAmount(value));
                    }
                }
            />

            <button
                class="btn btn-primary btn-block"
                disabled=button_disabled
                on:click=move |_| if connected() { on_submit() } else { wallet.connect() }
            >
                {button_label}
            </button>

            <div class="orders">
                <div class="orders-header">
                    <h3>"Your Orders"</h3>
                    <button
                        class="link-btn"
                        disabled=move || !connected() || form.with(|f| f.is_loading_orders)
                        on:click=move |_| load_orders()
                    >
                        "Refresh"
                    </button>
                </div>
                {move || {
                    if !connected() {
                        return view! { <p class="muted">"Connect your wallet to see your orders"</p> }.into_any();
                    }
                    if form.with(|f| f.is_loading_orders) {
                        return view! { <p class="muted">"Loading orders..."</p> }.into_any();
                    }
                    let orders = form.with(|f| f.orders.clone());
                    if orders.is_empty() {
                        return view! { <p class="muted">"No orders yet"</p> }.into_any();
                    }
                    view! {
                        <ul class="order-list">
                            {orders
                                .into_iter()
                                .map(|order| view! {
                                    <OrderRow
                                        order=order
                                        cancelling=Signal::derive(move || form.with(|f| f.cancelling))
                                        on_cancel=Callback::new(on_cancel)
                                    />
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </div>

            <Show when=move || picker_open.get()>
                <TokenSelector
                    tokens=Signal::derive(move || form.with(|f| f.token_list.clone()))
                    exclude=Signal::derive(|| None)
                    on_select=Callback::new(move |token: Token| dispatch(LimitAction::SetToken(token)))
                    on_close=Callback::new(move |_| picker_open.set(false))
                />
            </Show>
        </div>
    }
}

#[component]
fn OrderRow(
    order: Order,
    #[prop(into)] cancelling: Signal<Option<u64>>,
    on_cancel: Callback<u64>,
) -> impl IntoView {
    let id = order.id;
    let badge_class = match order.order_type {
        OrderType::Buy => "badge badge-buy",
        OrderType::Sell => "badge badge-sell",
    };
    let can_cancel = order.can_cancel();

    view! {
        <li class="order-row">
            <div class="order-title">
                <span class=badge_class>{order.order_type.badge()}</span>
                <span>{order.title()}</span>
                <span class="muted">{order.status_text()}</span>
            </div>
            <div class="order-details">
                <span>{order.display_amount()}</span>
                <span class="muted">"@ "{order.display_price()}</span>
            </div>
            <Show when=move || can_cancel>
                <button
                    class="btn btn-secondary btn-small"
                    disabled=move || cancelling.get().is_some()
                    on:click=move |_| on_cancel.run(id)
                >
                    {move || if cancelling.get() == Some(id) { "Cancelling..." } else { "Cancel" }}
                </button>
            </Show>
        </li>
    }
}
