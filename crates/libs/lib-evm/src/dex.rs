//! # DEX Transaction Helpers
//!
//! Stateless async functions the panels call on submit. Each one builds
//! calldata with the bindings in [`crate::abi`], sends it through an
//! [`EvmClient`] and hands back a receipt or decoded value.
//!
//! ## Native currency
//!
//! Every chain lists its wrapped-native token (WETH, WBNB) as the "native"
//! entry. When that token is involved the helpers use the native balance and
//! attach value instead of going through ERC-20 calls.

use alloy_primitives::aliases::{U160, U24};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolEvent};
use futures::try_join;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use shared::chains::Chain;
use shared::dto::{Order, OrderType, Token, PRICE_DECIMALS};
use shared::forms::limit::OrderRequest;
use shared::forms::send::SendRequest;
use shared::forms::swap::{Side, SwapRequest};
use shared::units::{apply_slippage, format_amount, parse_amount};

use crate::abi::{ILimitOrder, IQuoterV2, ISwapRouter02, IERC20};
use crate::client::EvmClient;
use crate::error::{EvmError, Result};
use crate::provider::Eip1193;
use crate::types::{Receipt, TxRequest};

/// Pool fee tier used for quotes and swaps (0.3%).
pub const DEFAULT_FEE_TIER: u32 = 3000;
pub const NATIVE_DECIMALS: u8 = 18;
const UNKNOWN_SYMBOL: &str = "Unknown";

/// Balance of `token` held by `owner`, formatted with the token's decimals.
pub async fn fetch_balance<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    token: &Token,
    owner: Address,
) -> Result<String> {
    let raw = if chain.is_native(&token.address) {
        client.balance(owner).await?
    } else {
        client
            .call(token.address, &IERC20::balanceOfCall { account: owner })
            .await?
    };
    Ok(format_amount(raw, token.decimals))
}

/// Price `amount` of `token_in` in `token_out` through the chain's QuoterV2.
///
/// An empty amount short-circuits to an empty quote.
pub async fn quote_exact_input_single<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    token_in: &Token,
    token_out: &Token,
    amount: &str,
) -> Result<String> {
    if amount.trim().is_empty() {
        return Ok(String::new());
    }
    let amount_in = parse_amount(amount, token_in.decimals)?;
    let amount_out = quote_raw(client, chain, token_in, token_out, amount_in).await?;
    Ok(format_amount(amount_out, token_out.decimals))
}

async fn quote_raw<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    token_in: &Token,
    token_out: &Token,
    amount_in: U256,
) -> Result<U256> {
    let call = IQuoterV2::quoteExactInputSingleCall {
        params: IQuoterV2::QuoteExactInputSingleParams {
            tokenIn: token_in.address,
            tokenOut: token_out.address,
            amountIn: amount_in,
            fee: U24::from(DEFAULT_FEE_TIER),
            sqrtPriceLimitX96: U160::ZERO,
        },
    };
    let quote = client.call(chain.quoter_address, &call).await?;
    debug!(
        "Quote {} {} -> {} {}",
        amount_in, token_in.symbol, quote.amountOut, token_out.symbol
    );
    Ok(quote.amountOut)
}

pub async fn approve_token<P: Eip1193>(
    client: &EvmClient<P>,
    owner: Address,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<Receipt> {
    info!("Approving {} of {} for {}", amount, token, spender);
    let data = IERC20::approveCall { spender, amount }.abi_encode();
    client
        .send_and_confirm(TxRequest::call(token, data).with_from(owner))
        .await
}

/// Approve `spender` only when the current allowance is below `amount`.
/// Returns the approval receipt when one was needed.
pub async fn ensure_allowance<P: Eip1193>(
    client: &EvmClient<P>,
    owner: Address,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<Option<Receipt>> {
    let allowance = client
        .call(token, &IERC20::allowanceCall { owner, spender })
        .await?;
    if allowance >= amount {
        debug!("Allowance {} covers {}", allowance, amount);
        return Ok(None);
    }
    approve_token(client, owner, token, spender, amount)
        .await
        .map(Some)
}

/// Swap through SwapRouter02.
///
/// `exactInputSingle` is wrapped in `multicall(deadline, ...)` with the
/// deadline counted from `now_secs`. The minimum output is the quoted amount
/// less the slippage tolerance. When the output field was the one typed, the
/// input is priced forward again and the minimum comes from that quote.
pub async fn execute_swap<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
    request: &SwapRequest,
    now_secs: u64,
) -> Result<Receipt> {
    let router = chain.swap_router_address;
    let amount_in = parse_amount(&request.amount_in, request.token_in.decimals)?;
    let quoted_out = match request.exact {
        Side::From => parse_amount(&request.quoted_out, request.token_out.decimals)?,
        Side::To => {
            quote_raw(client, chain, &request.token_in, &request.token_out, amount_in).await?
        }
    };
    let amount_out_minimum = apply_slippage(quoted_out, request.slippage);
    let deadline = U256::from(now_secs + u64::from(request.deadline_minutes) * 60);

    let native_in = chain.is_native(&request.token_in.address);
    if !native_in {
        ensure_allowance(client, owner, request.token_in.address, router, amount_in).await?;
    }

    let swap = ISwapRouter02::exactInputSingleCall {
        params: ISwapRouter02::ExactInputSingleParams {
            tokenIn: request.token_in.address,
            tokenOut: request.token_out.address,
            fee: U24::from(DEFAULT_FEE_TIER),
            recipient: owner,
            amountIn: amount_in,
            amountOutMinimum: amount_out_minimum,
            sqrtPriceLimitX96: U160::ZERO,
        },
    };
    let data = ISwapRouter02::multicallCall {
        deadline,
        data: vec![Bytes::from(swap.abi_encode())],
    }
    .abi_encode();

    let mut tx = TxRequest::call(router, data).with_from(owner);
    if native_in {
        tx = tx.with_value(amount_in);
    }
    info!(
        "Swapping {} {} for at least {} {}",
        request.amount_in,
        request.token_in.symbol,
        format_amount(amount_out_minimum, request.token_out.decimals),
        request.token_out.symbol
    );
    client.send_and_confirm(tx).await
}

/// Transfer tokens, or native currency when the native token is selected.
pub async fn send_token<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
    request: &SendRequest,
) -> Result<Receipt> {
    let amount = parse_amount(&request.amount, request.token.decimals)?;
    let tx = if chain.is_native(&request.token.address) {
        TxRequest::transfer(owner, request.recipient, amount)
    } else {
        let data = IERC20::transferCall {
            to: request.recipient,
            amount,
        }
        .abi_encode();
        TxRequest::call(request.token.address, data).with_from(owner)
    };
    info!(
        "Sending {} {} to {}",
        request.amount, request.token.symbol, request.recipient
    );
    client.send_and_confirm(tx).await
}

/// Read ERC-20 metadata and `owner`'s balance for an arbitrary address.
pub async fn token_info<P: Eip1193>(
    client: &EvmClient<P>,
    address: Address,
    owner: Address,
) -> Result<Token> {
    let balance_call = IERC20::balanceOfCall { account: owner };
    let (name, symbol, decimals, balance) = try_join!(
        client.call(address, &IERC20::nameCall {}),
        client.call(address, &IERC20::symbolCall {}),
        client.call(address, &IERC20::decimalsCall {}),
        client.call(address, &balance_call),
    )?;
    Ok(Token::new(address, symbol, name, decimals).with_balance(format_amount(balance, decimals)))
}

pub async fn token_symbol<P: Eip1193>(client: &EvmClient<P>, address: Address) -> Result<String> {
    client.call(address, &IERC20::symbolCall {}).await
}

pub async fn token_decimals<P: Eip1193>(client: &EvmClient<P>, address: Address) -> Result<u8> {
    client.call(address, &IERC20::decimalsCall {}).await
}

fn limiter(chain: &Chain) -> Result<Address> {
    chain
        .limiter_address
        .ok_or_else(|| EvmError::LimitOrdersUnavailable(chain.name.to_string()))
}

/// Order id from the limiter's `OrderCreated` log, if the receipt has one.
pub fn order_id_from_receipt(receipt: &Receipt, limiter: Address) -> Option<u64> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == limiter)
        .find(|log| log.topics.first() == Some(&ILimitOrder::OrderCreated::SIGNATURE_HASH))
        .and_then(|log| log.topics.get(1))
        .and_then(|topic| u64::try_from(U256::from_be_bytes(topic.0)).ok())
}

/// Place a buy order: escrow `eth_amount` of native currency for `token_out`
/// at `price` USD.
pub async fn create_buy_order<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
    token_out: Address,
    price: &str,
    eth_amount: &str,
) -> Result<Option<u64>> {
    let limiter = limiter(chain)?;
    let price_usd = parse_amount(price, PRICE_DECIMALS)?;
    let value = parse_amount(eth_amount, NATIVE_DECIMALS)?;
    let data = ILimitOrder::buyOrderCall {
        tokenOut: token_out,
        priceUSD: price_usd,
    }
    .abi_encode();
    let tx = TxRequest::call(limiter, data)
        .with_from(owner)
        .with_value(value);
    let receipt = client.send_and_confirm(tx).await?;
    Ok(order_id_from_receipt(&receipt, limiter))
}

/// Place a sell order for `amount` of `token_in`, approving the limiter first
/// when needed. Decimals are read from the token contract.
pub async fn create_sell_order<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
    token_in: Address,
    price: &str,
    amount: &str,
) -> Result<Option<u64>> {
    let limiter = limiter(chain)?;
    let decimals = token_decimals(client, token_in).await?;
    let amount_in = parse_amount(amount, decimals)?;
    let price_usd = parse_amount(price, PRICE_DECIMALS)?;

    ensure_allowance(client, owner, token_in, limiter, amount_in).await?;

    let data = ILimitOrder::sellOrderCall {
        tokenIn: token_in,
        priceUSD: price_usd,
        amountIn: amount_in,
    }
    .abi_encode();
    let receipt = client
        .send_and_confirm(TxRequest::call(limiter, data).with_from(owner))
        .await?;
    Ok(order_id_from_receipt(&receipt, limiter))
}

pub async fn create_order<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
    request: &OrderRequest,
) -> Result<Option<u64>> {
    match request {
        OrderRequest::Buy {
            token,
            price,
            eth_amount,
        } => create_buy_order(client, chain, owner, token.address, price, eth_amount).await,
        OrderRequest::Sell {
            token,
            price,
            amount,
        } => create_sell_order(client, chain, owner, token.address, price, amount).await,
    }
}

pub async fn cancel_order<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
    order_id: u64,
) -> Result<Receipt> {
    let limiter = limiter(chain)?;
    info!("Cancelling order #{}", order_id);
    let data = ILimitOrder::cancelOrderCall {
        orderId: U256::from(order_id),
    }
    .abi_encode();
    client
        .send_and_confirm(TxRequest::call(limiter, data).with_from(owner))
        .await
}

async fn token_metadata<P: Eip1193>(client: &EvmClient<P>, address: Address) -> (String, u8) {
    match try_join!(token_symbol(client, address), token_decimals(client, address)) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Metadata lookup failed for {}: {}", address, e);
            (UNKNOWN_SYMBOL.to_string(), NATIVE_DECIMALS)
        }
    }
}

/// Orders placed by `owner`, in contract order. The position in the list is
/// the id `cancelOrder` expects.
pub async fn user_orders<P: Eip1193>(
    client: &EvmClient<P>,
    chain: &Chain,
    owner: Address,
) -> Result<Vec<Order>> {
    let limiter = limiter(chain)?;
    let raw = client
        .call_as(owner, limiter, &ILimitOrder::viewMyOrdersCall {})
        .await?;

    let mut metadata: HashMap<Address, (String, u8)> = HashMap::new();
    let mut orders = Vec::with_capacity(raw.len());
    for (index, order) in raw.into_iter().enumerate() {
        let Some(order_type) = OrderType::from_code(order.odt) else {
            warn!("Skipping order #{} with unknown type {}", index, order.odt);
            continue;
        };
        let (amount_symbol, amount_decimals) = match order_type {
            OrderType::Buy => (chain.symbol.to_string(), NATIVE_DECIMALS),
            OrderType::Sell => match metadata.get(&order.tokenIn) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = token_metadata(client, order.tokenIn).await;
                    metadata.insert(order.tokenIn, fetched.clone());
                    fetched
                }
            },
        };
        orders.push(Order {
            id: index as u64,
            order_type,
            token_in: order.tokenIn,
            token_out: order.tokenOut,
            amount_in: order.amountIn,
            price_usd: order.priceUSD,
            owner: order.user,
            executed: order.executed,
            amount_symbol,
            amount_decimals,
        });
    }
    debug!("Loaded {} orders for {}", orders.len(), owner);
    Ok(orders)
}
